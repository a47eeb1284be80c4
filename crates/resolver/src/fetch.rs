use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use platter_schema::EntityId;

use crate::error::FetchError;

/// One candidate entity returned by a fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRecord {
	pub id: EntityId,
	pub fields: IndexMap<Arc<str>, String>,
}

impl EntityRecord {
	pub fn new(id: impl Into<EntityId>) -> Self {
		Self {
			id: id.into(),
			fields: IndexMap::new(),
		}
	}

	pub fn with(mut self, field: impl Into<Arc<str>>, value: impl Into<String>) -> Self {
		self.fields.insert(field.into(), value.into());
		self
	}

	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields.get(name).map(String::as_str)
	}

	/// Option label built from `display_fields`, falling back to the id.
	pub fn label(&self, display_fields: &[Arc<str>]) -> String {
		let parts: Vec<&str> = display_fields
			.iter()
			.filter_map(|field| self.field(field))
			.filter(|value| !value.is_empty())
			.collect();
		if parts.is_empty() {
			self.id.to_string()
		} else {
			parts.join(" - ")
		}
	}

	/// Case-insensitive substring match against the id and every field.
	pub fn matches(&self, term: &str) -> bool {
		let needle = term.to_lowercase();
		self.id.as_str().to_lowercase().contains(&needle)
			|| self.fields.values().any(|value| value.to_lowercase().contains(&needle))
	}
}

/// Entity-fetch service for one relation.
#[async_trait]
pub trait EntityFetcher: Send + Sync {
	/// Fetches up to `limit` candidates matching `term`; `None` requests the default page.
	async fn fetch(&self, term: Option<&str>, limit: usize) -> Result<Vec<EntityRecord>, FetchError>;
}
