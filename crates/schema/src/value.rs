use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a referenced remote entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Arc<str>);

impl EntityId {
	pub fn new(id: impl Into<Arc<str>>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EntityId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for EntityId {
	fn from(id: String) -> Self {
		Self::new(id)
	}
}

/// One cell of a row.
///
/// `Null` is a legal value for every kind; whether it is acceptable is a
/// validation question answered by [`crate::RowSchema`], not a shape question.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
	Null,
	Text(String),
	Number(f64),
	Boolean(bool),
	Date(NaiveDate),
	Reference(EntityId),
}

impl FieldValue {
	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	pub const fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub const fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub const fn as_date(&self) -> Option<NaiveDate> {
		match self {
			Self::Date(d) => Some(*d),
			_ => None,
		}
	}

	pub const fn as_reference(&self) -> Option<&EntityId> {
		match self {
			Self::Reference(id) => Some(id),
			_ => None,
		}
	}

	/// Variant name used in diagnostics.
	pub const fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Text(_) => "text",
			Self::Number(_) => "number",
			Self::Boolean(_) => "boolean",
			Self::Date(_) => "date",
			Self::Reference(_) => "reference",
		}
	}
}

impl From<&str> for FieldValue {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}

impl From<String> for FieldValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<f64> for FieldValue {
	fn from(n: f64) -> Self {
		Self::Number(n)
	}
}

impl From<bool> for FieldValue {
	fn from(b: bool) -> Self {
		Self::Boolean(b)
	}
}

impl From<NaiveDate> for FieldValue {
	fn from(d: NaiveDate) -> Self {
		Self::Date(d)
	}
}

impl From<EntityId> for FieldValue {
	fn from(id: EntityId) -> Self {
		Self::Reference(id)
	}
}

impl From<Option<EntityId>> for FieldValue {
	fn from(id: Option<EntityId>) -> Self {
		id.map_or(Self::Null, Self::Reference)
	}
}
