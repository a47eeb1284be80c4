use std::sync::Arc;

use platter_schema::SchemaError;
use thiserror::Error;

/// Errors raised by the parent form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
	/// The form has no collection with this name.
	#[error("unknown collection `{0}`")]
	UnknownCollection(Arc<str>),

	/// A value or payload does not fit the form schema.
	#[error(transparent)]
	Schema(#[from] SchemaError),

	/// Submission refused because validation failed.
	#[error("form has {messages} validation error(s)")]
	Invalid {
		/// Number of field messages.
		messages: usize,
	},

	/// A submission is already pending.
	#[error("submit already in progress")]
	SubmitInProgress,
}

/// Result type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
