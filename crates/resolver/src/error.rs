use std::sync::Arc;

use thiserror::Error;

/// Failure reported by an entity-fetch service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The service could not be reached.
	#[error("entity service unavailable: {0}")]
	Unavailable(String),

	/// The service answered with an error status.
	#[error("entity service rejected the request ({status}): {message}")]
	Rejected {
		/// Status code reported by the service.
		status: u16,
		/// Response message.
		message: String,
	},

	/// The response could not be decoded.
	#[error("malformed entity response: {0}")]
	Malformed(String),
}

/// Errors returned by slot searches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	/// The fetch failed; the slot shows the message inline.
	#[error(transparent)]
	Fetch(#[from] FetchError),

	/// A newer request was issued for the same slot before this one completed.
	#[error("request {request} superseded by a newer search")]
	Superseded {
		/// Id of the dropped request.
		request: u64,
	},

	/// The slot was released while the request was pending.
	#[error("resolver slot released")]
	Released,

	/// No fetcher is registered for the relation.
	#[error("no entity fetcher registered for relation `{0}`")]
	UnknownRelation(Arc<str>),
}

impl ResolveError {
	/// True for outcomes the caller should silently ignore.
	pub const fn is_stale(&self) -> bool {
		matches!(self, Self::Superseded { .. } | Self::Released)
	}
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
