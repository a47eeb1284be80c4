//! Declarative description of nested-collection rows.
//!
//! Everything here is plain data: which fields a row has, what kind of value each
//! field holds, and which rules a row must satisfy. Mutation and rendering live in
//! `platter-form`; remote lookups for foreign keys live in `platter-resolver`.

/// Schema error types.
pub mod error;
/// Parent form and collection descriptors.
pub mod form;
/// JSON interchange for rows and values.
pub mod json;
/// Field kinds and their per-kind configuration.
pub mod kind;
/// Validation rules and the per-row error structures they produce.
pub mod rules;
/// Row shapes and row values.
pub mod shape;
/// Cell values and entity identifiers.
pub mod value;

pub use error::{Result, SchemaError};
pub use form::{CollectionSchema, FormSchema};
pub use kind::{DEFAULT_DATE_FORMAT, DateConfig, FieldKind, ForeignKeyConfig, NumberConfig};
pub use rules::{Check, ErrorState, FieldRule, RowErrors, RowSchema};
pub use shape::{CollectionFieldSpec, Row, RowShape};
pub use value::{EntityId, FieldValue};

#[cfg(test)]
mod tests;
