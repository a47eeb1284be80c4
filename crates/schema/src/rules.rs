//! Row validation rules and the error structures they produce.
//!
//! A [`RowSchema`] plays the role of an object schema over one row: each
//! [`FieldRule`] checks a single field and yields at most one message. Validating a
//! whole collection yields an [`ErrorState`], a list parallel to the rows that is
//! never longer than the rows it was computed from.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::shape::Row;
use crate::value::FieldValue;

/// Additional per-field check applied after the required/nullable check.
#[derive(Clone, Debug, PartialEq)]
pub enum Check {
	/// Number must have no fractional part.
	Integer,
	/// Number must be at least this value.
	Min(f64),
	/// Number must be at most this value.
	Max(f64),
	/// Text must be at most this many characters.
	MaxLength(usize),
}

impl Check {
	fn message(&self, field: &str, value: &FieldValue) -> Option<String> {
		match (self, value) {
			(Self::Integer, FieldValue::Number(n)) if n.fract() != 0.0 => Some(format!("{field} must be an integer")),
			(Self::Min(min), FieldValue::Number(n)) if n < min => {
				Some(format!("{field} must be greater than or equal to {min}"))
			}
			(Self::Max(max), FieldValue::Number(n)) if n > max => {
				Some(format!("{field} must be less than or equal to {max}"))
			}
			(Self::MaxLength(limit), FieldValue::Text(text)) if text.chars().count() > *limit => {
				Some(format!("{field} must be at most {limit} characters"))
			}
			_ => None,
		}
	}
}

/// Rule for a single field of a row.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRule {
	pub field: Arc<str>,
	/// Null (and empty text) is rejected.
	pub required: bool,
	pub checks: Vec<Check>,
}

impl FieldRule {
	/// Field must be present and non-empty.
	pub fn required(field: impl Into<Arc<str>>) -> Self {
		Self {
			field: field.into(),
			required: true,
			checks: Vec::new(),
		}
	}

	/// Field may be null; checks only apply to non-null values.
	pub fn optional(field: impl Into<Arc<str>>) -> Self {
		Self {
			field: field.into(),
			required: false,
			checks: Vec::new(),
		}
	}

	pub fn check(mut self, check: Check) -> Self {
		self.checks.push(check);
		self
	}

	/// First failing message for `value`, if any.
	pub fn evaluate(&self, value: Option<&FieldValue>) -> Option<String> {
		let missing = match value {
			None => true,
			Some(FieldValue::Text(text)) => text.is_empty(),
			Some(other) => other.is_null(),
		};
		if missing {
			return self.required.then(|| format!("{} is a required field", self.field));
		}
		let value = value?;
		self.checks.iter().find_map(|check| check.message(&self.field, value))
	}
}

/// Validation schema for one row shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowSchema {
	rules: Vec<FieldRule>,
}

impl RowSchema {
	pub fn new(rules: Vec<FieldRule>) -> Self {
		Self { rules }
	}

	/// Validates a single row.
	pub fn validate(&self, row: &Row) -> RowErrors {
		let mut errors = RowErrors::default();
		for rule in &self.rules {
			if let Some(message) = rule.evaluate(row.get(&rule.field)) {
				errors.insert(Arc::clone(&rule.field), message);
			}
		}
		errors
	}

	/// Validates every row, producing a trimmed [`ErrorState`].
	pub fn validate_rows(&self, rows: &[Row]) -> ErrorState {
		ErrorState::from_rows(rows.iter().map(|row| self.validate(row)).collect())
	}
}

/// Error messages for one row, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowErrors {
	messages: IndexMap<Arc<str>, String>,
}

impl RowErrors {
	pub fn get(&self, field: &str) -> Option<&str> {
		self.messages.get(field).map(String::as_str)
	}

	pub fn insert(&mut self, field: impl Into<Arc<str>>, message: impl Into<String>) {
		self.messages.insert(field.into(), message.into());
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &str)> {
		self.messages.iter().map(|(field, message)| (field, message.as_str()))
	}
}

impl<K: Into<Arc<str>>, V: Into<String>> FromIterator<(K, V)> for RowErrors {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			messages: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}

/// Per-row errors for one collection, parallel to its rows.
///
/// Trailing clean rows are not stored, so the state is often shorter than the
/// collection. An index past the end means "no error for this row".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorState {
	rows: Vec<RowErrors>,
}

impl ErrorState {
	/// Builds an error state, dropping trailing clean entries.
	pub fn from_rows(rows: Vec<RowErrors>) -> Self {
		let mut state = Self { rows };
		state.trim();
		state
	}

	pub fn get(&self, index: usize) -> Option<&RowErrors> {
		self.rows.get(index)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// True when no row carries a message.
	pub fn is_clean(&self) -> bool {
		self.rows.iter().all(RowErrors::is_empty)
	}

	/// Total number of field messages across rows.
	pub fn message_count(&self) -> usize {
		self.rows.iter().map(RowErrors::len).sum()
	}

	/// Replaces the entry for one row, padding with clean entries as needed.
	pub fn set_row(&mut self, index: usize, errors: RowErrors) {
		if index >= self.rows.len() {
			if errors.is_empty() {
				return;
			}
			self.rows.resize_with(index + 1, RowErrors::default);
		}
		self.rows[index] = errors;
		self.trim();
	}

	/// Drops entries at and past `len`.
	pub fn truncate(&mut self, len: usize) {
		self.rows.truncate(len);
		self.trim();
	}

	pub fn iter(&self) -> impl Iterator<Item = &RowErrors> {
		self.rows.iter()
	}

	fn trim(&mut self) {
		while self.rows.last().is_some_and(RowErrors::is_empty) {
			self.rows.pop();
		}
	}
}
