//! Referenced-entity resolution for foreign-key fields.
//!
//! # Mental model
//!
//! * Every foreign-key cell on screen owns one slot, keyed by
//!   `(collection, row index, field)`. Slots never share mutable state.
//! * A slot hands out a monotonic request id per `search`. A response is applied
//!   only if its id is still the latest one issued for that slot; anything older is
//!   dropped as stale (last-request-wins, independent of arrival order).
//! * Each slot caches the most recent successful result keyed by its term. Searching
//!   a different term invalidates the cache.
//! * Releasing a slot cancels its in-flight requests and forgets its cache.
//!
//! # Invariants
//!
//! * Must never apply a response whose request id is older than the slot's latest.
//! * Must keep a failed fetch local to its slot.
//! * Must not hold a slot lock across an `.await`.
//!
//! # Lifecycle
//!
//! * Build a [`Resolver`] and [`Resolver::register`] one [`EntityFetcher`] per relation.
//! * Call [`Resolver::slot`] for each rendered foreign-key cell, then
//!   [`SlotHandle::ensure_loaded`] for the default page and [`SlotHandle::search`] on input.
//! * Call [`Resolver::retain_rows`] after row removals and
//!   [`Resolver::release_collection`] when a collection field unmounts.

mod config;
mod error;
mod fetch;
mod resolver;
mod slot;

pub use config::ResolverConfig;
pub use error::{FetchError, ResolveError, Result};
pub use fetch::{EntityFetcher, EntityRecord};
pub use resolver::Resolver;
pub use slot::{SlotHandle, SlotKey, SlotSnapshot};
