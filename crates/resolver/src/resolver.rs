use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::fetch::EntityFetcher;
use crate::slot::{SlotHandle, SlotKey, SlotSnapshot};

/// Registry of fetchers per relation and of live slots per foreign-key cell.
pub struct Resolver {
	config: ResolverConfig,
	fetchers: HashMap<Arc<str>, Arc<dyn EntityFetcher>>,
	slots: Mutex<HashMap<SlotKey, SlotHandle>>,
}

impl std::fmt::Debug for Resolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resolver")
			.field("config", &self.config)
			.field("relations", &self.fetchers.keys().collect::<Vec<_>>())
			.field("slots", &self.slots.lock().len())
			.finish()
	}
}

impl Resolver {
	pub fn new(config: ResolverConfig) -> Self {
		Self {
			config,
			fetchers: HashMap::new(),
			slots: Mutex::new(HashMap::new()),
		}
	}

	/// Registers the fetch service for `relation`, replacing any previous one.
	pub fn register(&mut self, relation: impl Into<Arc<str>>, fetcher: Arc<dyn EntityFetcher>) {
		self.fetchers.insert(relation.into(), fetcher);
	}

	pub fn has_relation(&self, relation: &str) -> bool {
		self.fetchers.contains_key(relation)
	}

	/// Returns the slot for `key`, creating it on first use.
	pub fn slot(&self, key: &SlotKey, relation: &str) -> Result<SlotHandle> {
		let mut slots = self.slots.lock();
		if let Some(handle) = slots.get(key) {
			return Ok(handle.clone());
		}
		let fetcher = self
			.fetchers
			.get(relation)
			.ok_or_else(|| ResolveError::UnknownRelation(Arc::from(relation)))?;
		let handle = SlotHandle::new(key.clone(), Arc::clone(fetcher), self.config.clone());
		slots.insert(key.clone(), handle.clone());
		tracing::trace!(?key, relation, "resolver slot created");
		Ok(handle)
	}

	/// Display state of an existing slot.
	pub fn snapshot(&self, key: &SlotKey) -> Option<SlotSnapshot> {
		self.slots.lock().get(key).map(SlotHandle::snapshot)
	}

	pub fn slot_count(&self) -> usize {
		self.slots.lock().len()
	}

	/// Releases one slot, cancelling its in-flight requests.
	pub fn release(&self, key: &SlotKey) {
		if let Some(handle) = self.slots.lock().remove(key) {
			handle.release();
		}
	}

	/// Releases slots of `collection` at positions `len` and beyond.
	///
	/// Called after row removal; slots below `len` stay and now serve the row
	/// that shifted into their position.
	pub fn retain_rows(&self, collection: &str, len: usize) {
		self.release_where(|key| &*key.collection == collection && key.index >= len);
	}

	/// Releases every slot of `collection` (the field unmounted).
	pub fn release_collection(&self, collection: &str) {
		self.release_where(|key| &*key.collection == collection);
	}

	fn release_where(&self, mut predicate: impl FnMut(&SlotKey) -> bool) {
		let mut released = Vec::new();
		self.slots.lock().retain(|key, handle| {
			if predicate(key) {
				released.push(handle.clone());
				false
			} else {
				true
			}
		});
		for handle in &released {
			handle.release();
		}
		if !released.is_empty() {
			tracing::debug!(count = released.len(), "resolver slots released");
		}
	}
}
