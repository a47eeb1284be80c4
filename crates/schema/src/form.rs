use std::sync::Arc;

use crate::error::Result;
use crate::rules::RowSchema;
use crate::shape::{Row, RowShape};

/// Everything needed to drive one nested collection field.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionSchema {
	pub name: Arc<str>,
	pub title: Arc<str>,
	pub shape: RowShape,
	pub rules: RowSchema,
	initial_row: Row,
}

impl CollectionSchema {
	/// Builds a collection descriptor. `initial_row` must conform to `shape`.
	pub fn new(
		name: impl Into<Arc<str>>,
		title: impl Into<Arc<str>>,
		shape: RowShape,
		initial_row: Row,
		rules: RowSchema,
	) -> Result<Self> {
		shape.conform(&initial_row)?;
		Ok(Self {
			name: name.into(),
			title: title.into(),
			shape,
			rules,
			initial_row,
		})
	}

	/// Row appended by the "add row" control.
	pub fn initial_row(&self) -> &Row {
		&self.initial_row
	}
}

/// Parent form: top-level scalar fields plus named collections.
///
/// Scalars reuse [`RowShape`]: the parent record is itself a single row.
#[derive(Clone, Debug, PartialEq)]
pub struct FormSchema {
	pub name: Arc<str>,
	pub title: Arc<str>,
	pub scalars: RowShape,
	pub scalar_rules: RowSchema,
	/// Initial scalar values for create flows.
	pub scalar_defaults: Row,
	pub collections: Vec<CollectionSchema>,
}

impl FormSchema {
	/// Builds a form descriptor. `scalar_defaults` must conform to `scalars`.
	pub fn new(
		name: impl Into<Arc<str>>,
		title: impl Into<Arc<str>>,
		scalars: RowShape,
		scalar_rules: RowSchema,
		scalar_defaults: Row,
		collections: Vec<CollectionSchema>,
	) -> Result<Self> {
		scalars.conform(&scalar_defaults)?;
		Ok(Self {
			name: name.into(),
			title: title.into(),
			scalars,
			scalar_rules,
			scalar_defaults,
			collections,
		})
	}

	pub fn collection(&self, name: &str) -> Option<&CollectionSchema> {
		self.collections.iter().find(|c| &*c.name == name)
	}

	pub fn collection_names(&self) -> impl Iterator<Item = &str> {
		self.collections.iter().map(|c| &*c.name)
	}
}
