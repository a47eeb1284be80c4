//! In-memory entity directory.
//!
//! Serves fixed record sets through [`EntityFetcher`] so forms can be rendered and
//! checked without a backend. Records load from a JSON object keyed by relation:
//!
//! ```json
//! { "restaurants": [{ "id": "r-1", "name": "Trattoria" }] }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use platter_resolver::{EntityFetcher, EntityRecord, FetchError, Resolver};
use serde_json::Value;
use tracing::debug;

/// Fixed list of records for one relation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticDirectory {
	records: Vec<EntityRecord>,
}

impl StaticDirectory {
	pub fn new(records: Vec<EntityRecord>) -> Self {
		Self { records }
	}

	pub fn records(&self) -> &[EntityRecord] {
		&self.records
	}

	/// Parses a relation-keyed JSON object into one directory per relation.
	pub fn load(value: &Value) -> Result<IndexMap<Arc<str>, Self>, FetchError> {
		let Value::Object(relations) = value else {
			return Err(FetchError::Malformed("directory must be an object keyed by relation".into()));
		};
		relations
			.iter()
			.map(|(relation, records)| {
				let Value::Array(records) = records else {
					return Err(FetchError::Malformed(format!("relation `{relation}` must hold an array")));
				};
				let records = records
					.iter()
					.map(|record| record_from_json(relation, record))
					.collect::<Result<Vec<_>, _>>()?;
				Ok((Arc::from(relation.as_str()), Self::new(records)))
			})
			.collect()
	}

	/// Registers every loaded directory on `resolver` under its relation name.
	pub fn register_all(resolver: &mut Resolver, directories: IndexMap<Arc<str>, Self>) {
		for (relation, directory) in directories {
			debug!(relation = %relation, records = directory.records.len(), "directory.register");
			resolver.register(relation, Arc::new(directory));
		}
	}
}

fn record_from_json(relation: &str, value: &Value) -> Result<EntityRecord, FetchError> {
	let Value::Object(object) = value else {
		return Err(FetchError::Malformed(format!("`{relation}` records must be objects")));
	};
	let id = match object.get("id") {
		Some(Value::String(id)) => id.clone(),
		Some(Value::Number(id)) => id.to_string(),
		_ => return Err(FetchError::Malformed(format!("`{relation}` record without an id"))),
	};
	let mut record = EntityRecord::new(id);
	for (key, field) in object.iter().filter(|(key, _)| key.as_str() != "id") {
		let text = match field {
			Value::String(text) => text.clone(),
			Value::Number(number) => number.to_string(),
			Value::Bool(flag) => flag.to_string(),
			Value::Null | Value::Array(_) | Value::Object(_) => continue,
		};
		record = record.with(key.as_str(), text);
	}
	Ok(record)
}

#[async_trait]
impl EntityFetcher for StaticDirectory {
	async fn fetch(&self, term: Option<&str>, limit: usize) -> Result<Vec<EntityRecord>, FetchError> {
		let records = self
			.records
			.iter()
			.filter(|record| term.is_none_or(|term| record.matches(term)))
			.take(limit)
			.cloned()
			.collect();
		Ok(records)
	}
}
