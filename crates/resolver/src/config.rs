use std::time::Duration;

use serde::Deserialize;

/// Default delay between the last keystroke and the fetch it triggers.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default number of candidates requested per fetch.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Tuning for candidate searches.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
	/// Debounce applied to non-empty search terms. Zero disables debouncing.
	pub debounce_ms: u64,
	/// Page size passed to the fetcher.
	pub page_size: usize,
	/// Terms shorter than this fall back to the default page.
	pub min_term_len: usize,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
			page_size: DEFAULT_PAGE_SIZE,
			min_term_len: 0,
		}
	}
}

impl ResolverConfig {
	pub const fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Trims `term` and maps empty or too-short input to the default page.
	pub(crate) fn normalize_term(&self, term: Option<&str>) -> Option<String> {
		let term = term.map(str::trim).filter(|t| !t.is_empty())?;
		(term.chars().count() >= self.min_term_len).then(|| term.to_owned())
	}
}
