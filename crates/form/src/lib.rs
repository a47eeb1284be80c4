//! Nested-collection form fields.
//!
//! A parent [`FormModel`] owns the value tree: scalar fields plus, per collection
//! name, a [`CollectionState`] of rows and an [`ErrorState`](platter_schema::ErrorState).
//! [`CollectionField`] borrows one collection to render it through a
//! [`FieldRenderer`], and the events the renderer reports come back through
//! [`FormModel::dispatch`], which turns them into [`CollectionOp`]s for the reducer.
//!
//! # Data flow
//!
//! 1. The page builds a form with [`FormModel::create`] or [`FormModel::edit`].
//! 2. For each collection, [`FormModel::collection_field`] yields a view that
//!    renders one row per element and one cell per declared field.
//! 3. Widgets report [`CollectionEvent`]s; the form translates and applies them at
//!    `(collection, row, field)` and refreshes the edited row's errors.
//! 4. [`FormModel::begin_submit`] validates everything and yields the request body.

/// Validation error routing.
pub mod adapter;
/// Form error types.
pub mod error;
/// Rendering and event translation for one collection field.
pub mod field;
/// Parent form value tree and lifecycle.
pub mod form;
/// Row list reducer.
pub mod store;

pub use adapter::ErrorView;
pub use error::{FormError, Result};
pub use field::{
	CollectionEvent, CollectionField, CollectionHeader, FieldCell, FieldChange, FieldInput, FieldRenderer, RowPath,
	event_to_op,
};
pub use form::{FormErrors, FormModel, FormValues, ValidationMode};
pub use store::{CollectionOp, CollectionState, IgnoreReason, OpOutcome};

#[cfg(test)]
mod invariants;
