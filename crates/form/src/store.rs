//! Row list for one collection field and the reducer that mutates it.

use std::sync::Arc;

use platter_schema::{EntityId, FieldValue, Row, RowShape, SchemaError};

/// Structural mutation of one collection.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionOp {
	/// Push a row at the end.
	Append(Row),
	/// Delete the row at an index; later rows shift down.
	RemoveAt(usize),
	/// Replace one field of one row.
	UpdateField {
		index: usize,
		field: Arc<str>,
		value: FieldValue,
	},
}

/// Why an operation left the collection untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
	IndexOutOfBounds { index: usize, len: usize },
	Shape(SchemaError),
	/// A foreign-key selection not offered by the last successful lookup.
	UnresolvedReference(EntityId),
}

/// Result of applying a [`CollectionOp`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpOutcome {
	Applied,
	Ignored(IgnoreReason),
}

impl OpOutcome {
	pub const fn is_applied(&self) -> bool {
		matches!(self, Self::Applied)
	}
}

/// Ordered rows of one collection field.
///
/// Row identity is the index. There is no reordering; rows are appended at the
/// end or removed by index. Every mutation goes through [`CollectionState::apply`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionState {
	rows: Vec<Row>,
}

impl CollectionState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a state from rows, rejecting any row that does not fit `shape`.
	pub fn from_rows(shape: &RowShape, rows: Vec<Row>) -> Result<Self, SchemaError> {
		for row in &rows {
			shape.conform(row)?;
		}
		Ok(Self { rows })
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	pub fn get(&self, index: usize) -> Option<&Row> {
		self.rows.get(index)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Single entry point for every row mutation.
	pub fn apply(&mut self, shape: &RowShape, op: CollectionOp) -> OpOutcome {
		let outcome = match op {
			CollectionOp::Append(row) => match shape.conform(&row) {
				Ok(()) => {
					self.rows.push(row);
					OpOutcome::Applied
				}
				Err(err) => OpOutcome::Ignored(IgnoreReason::Shape(err)),
			},
			CollectionOp::RemoveAt(index) => {
				if index < self.rows.len() {
					self.rows.remove(index);
					OpOutcome::Applied
				} else {
					OpOutcome::Ignored(IgnoreReason::IndexOutOfBounds {
						index,
						len: self.rows.len(),
					})
				}
			}
			CollectionOp::UpdateField { index, field, value } => {
				let len = self.rows.len();
				match self.rows.get_mut(index) {
					None => OpOutcome::Ignored(IgnoreReason::IndexOutOfBounds { index, len }),
					Some(row) => match shape.check_value(&field, &value) {
						Err(err) => OpOutcome::Ignored(IgnoreReason::Shape(err)),
						Ok(()) => match row.get_mut(&field) {
							Some(slot) => {
								*slot = value;
								OpOutcome::Applied
							}
							None => OpOutcome::Ignored(IgnoreReason::Shape(SchemaError::MissingField(field))),
						},
					},
				}
			}
		};
		if let OpOutcome::Ignored(reason) = &outcome {
			tracing::debug!(?reason, "collection op ignored");
		}
		outcome
	}

	pub fn append(&mut self, shape: &RowShape, row: Row) -> OpOutcome {
		self.apply(shape, CollectionOp::Append(row))
	}

	pub fn remove_at(&mut self, shape: &RowShape, index: usize) -> OpOutcome {
		self.apply(shape, CollectionOp::RemoveAt(index))
	}

	pub fn update_field(
		&mut self,
		shape: &RowShape,
		index: usize,
		field: impl Into<Arc<str>>,
		value: impl Into<FieldValue>,
	) -> OpOutcome {
		self.apply(
			shape,
			CollectionOp::UpdateField {
				index,
				field: field.into(),
				value: value.into(),
			},
		)
	}
}
