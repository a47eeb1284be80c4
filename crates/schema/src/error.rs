//! Error types for row shapes and value decoding.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised when a row or value does not fit its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
	/// Two fields in one shape share a name.
	#[error("duplicate field `{0}` in row shape")]
	DuplicateField(Arc<str>),

	/// A row carries a field its shape does not declare.
	#[error("unknown field `{0}`")]
	UnknownField(Arc<str>),

	/// A row lacks a field its shape declares.
	#[error("missing field `{0}`")]
	MissingField(Arc<str>),

	/// A value's variant does not match the field kind.
	#[error("field `{field}` expects a {expected} value, got {found}")]
	KindMismatch {
		/// Offending field.
		field: Arc<str>,
		/// Kind name declared by the shape.
		expected: &'static str,
		/// Variant name of the supplied value.
		found: &'static str,
	},

	/// A date string could not be parsed.
	#[error("field `{field}`: invalid date `{input}`")]
	InvalidDate {
		/// Offending field.
		field: Arc<str>,
		/// Raw input.
		input: String,
	},

	/// A JSON value had the wrong type for its field.
	#[error("field `{field}`: expected a JSON {expected}")]
	InvalidJson {
		/// Offending field, or the collection name for array-level errors.
		field: Arc<str>,
		/// Expected JSON type.
		expected: &'static str,
	},
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
