use std::sync::Arc;

use parking_lot::Mutex;
use platter_schema::EntityId;
use tokio_util::sync::CancellationToken;

use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::fetch::{EntityFetcher, EntityRecord};

/// Identity of one foreign-key cell: collection, row position, field.
///
/// Keys are positional. After a row removal the slot at an index belongs to
/// whichever row now occupies that index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotKey {
	pub collection: Arc<str>,
	pub index: usize,
	pub field: Arc<str>,
}

impl SlotKey {
	pub fn new(collection: impl Into<Arc<str>>, index: usize, field: impl Into<Arc<str>>) -> Self {
		Self {
			collection: collection.into(),
			index,
			field: field.into(),
		}
	}
}

/// Display state of one slot, as a select control would show it.
#[derive(Clone, Debug, Default)]
pub struct SlotSnapshot {
	/// Term of the most recently issued request.
	pub requested: Option<String>,
	/// Term the current candidates were fetched for.
	pub result_term: Option<String>,
	/// A request is in flight or waiting out its debounce.
	pub loading: bool,
	/// Candidates from the last successful fetch.
	pub candidates: Arc<[EntityRecord]>,
	/// Inline error from the latest failed fetch.
	pub error: Option<Arc<str>>,
	/// Number of requests issued so far.
	pub requests_issued: u64,
}

impl SlotSnapshot {
	/// True when `id` was part of the last successful fetch.
	pub fn offers(&self, id: &EntityId) -> bool {
		self.candidates.iter().any(|record| &record.id == id)
	}
}

#[derive(Debug)]
struct CacheEntry {
	term: Option<String>,
	records: Arc<[EntityRecord]>,
}

struct SlotState {
	latest_request: u64,
	/// Some fetch has succeeded; failed or superseded requests leave this unset.
	loaded: bool,
	snapshot: SlotSnapshot,
	cache: Option<CacheEntry>,
}

struct SlotInner {
	key: SlotKey,
	fetcher: Arc<dyn EntityFetcher>,
	config: ResolverConfig,
	cancel: CancellationToken,
	state: Mutex<SlotState>,
}

/// Shared handle to one slot. Cloning is cheap; clones observe the same state.
#[derive(Clone)]
pub struct SlotHandle {
	inner: Arc<SlotInner>,
}

impl std::fmt::Debug for SlotHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SlotHandle").field("key", &self.inner.key).finish_non_exhaustive()
	}
}

impl SlotHandle {
	pub(crate) fn new(key: SlotKey, fetcher: Arc<dyn EntityFetcher>, config: ResolverConfig) -> Self {
		Self {
			inner: Arc::new(SlotInner {
				key,
				fetcher,
				config,
				cancel: CancellationToken::new(),
				state: Mutex::new(SlotState {
					latest_request: 0,
					loaded: false,
					snapshot: SlotSnapshot::default(),
					cache: None,
				}),
			}),
		}
	}

	pub fn snapshot(&self) -> SlotSnapshot {
		self.inner.state.lock().snapshot.clone()
	}

	pub fn is_released(&self) -> bool {
		self.inner.cancel.is_cancelled()
	}

	/// Cancels pending requests and discards cached candidates.
	pub(crate) fn release(&self) {
		self.inner.cancel.cancel();
		let mut state = self.inner.state.lock();
		state.cache = None;
		state.snapshot.loading = false;
	}

	/// Fetches the default page unless some fetch already succeeded.
	///
	/// A failed or superseded earlier attempt does not count; the default page is
	/// requested again and its failure returned.
	pub async fn ensure_loaded(&self) -> Result<Arc<[EntityRecord]>> {
		let loaded = {
			let state = self.inner.state.lock();
			state.loaded.then(|| Arc::clone(&state.snapshot.candidates))
		};
		match loaded {
			Some(candidates) => Ok(candidates),
			None => self.search(None).await,
		}
	}

	/// Searches candidates for `term` and updates this slot's display state.
	///
	/// Returns [`ResolveError::Superseded`] when a newer search on this slot was
	/// issued before this one completed; its response is dropped unseen.
	pub async fn search(&self, term: Option<&str>) -> Result<Arc<[EntityRecord]>> {
		let inner = &self.inner;
		if inner.cancel.is_cancelled() {
			return Err(ResolveError::Released);
		}
		let term = inner.config.normalize_term(term);

		let request = {
			let mut state = inner.state.lock();
			state.latest_request = state.latest_request.wrapping_add(1);
			state.snapshot.requests_issued += 1;
			state.snapshot.requested = term.clone();
			let request = state.latest_request;

			let hit = state.cache.as_ref().filter(|entry| entry.term == term).map(|entry| Arc::clone(&entry.records));
			if let Some(records) = hit {
				tracing::trace!(key = ?inner.key, request, "resolver cache hit");
				state.snapshot.loading = false;
				state.snapshot.error = None;
				state.snapshot.result_term = term;
				state.snapshot.candidates = Arc::clone(&records);
				return Ok(records);
			}

			state.cache = None;
			state.snapshot.loading = true;
			request
		};

		let debounce = inner.config.debounce();
		if term.is_some() && !debounce.is_zero() {
			tokio::select! {
				biased;
				_ = inner.cancel.cancelled() => return Err(ResolveError::Released),
				_ = tokio::time::sleep(debounce) => {}
			}
			if inner.state.lock().latest_request != request {
				tracing::trace!(key = ?inner.key, request, "search debounced away");
				return Err(ResolveError::Superseded { request });
			}
		}

		let fetched = tokio::select! {
			biased;
			_ = inner.cancel.cancelled() => return Err(ResolveError::Released),
			fetched = inner.fetcher.fetch(term.as_deref(), inner.config.page_size) => fetched,
		};

		let mut state = inner.state.lock();
		if state.latest_request != request {
			tracing::debug!(key = ?inner.key, request, latest = state.latest_request, "dropping stale resolver response");
			return Err(ResolveError::Superseded { request });
		}
		state.snapshot.loading = false;
		match fetched {
			Ok(records) => {
				let records: Arc<[EntityRecord]> = records.into();
				tracing::trace!(key = ?inner.key, request, count = records.len(), "resolver candidates updated");
				state.loaded = true;
				state.cache = Some(CacheEntry {
					term: term.clone(),
					records: Arc::clone(&records),
				});
				state.snapshot.error = None;
				state.snapshot.result_term = term;
				state.snapshot.candidates = Arc::clone(&records);
				Ok(records)
			}
			Err(err) => {
				tracing::warn!(key = ?inner.key, request, error = %err, "entity fetch failed");
				state.snapshot.error = Some(Arc::from(err.to_string()));
				Err(ResolveError::Fetch(err))
			}
		}
	}
}
