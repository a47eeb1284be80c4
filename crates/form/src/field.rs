//! Collection form field: renders rows through a caller-supplied renderer and
//! translates row-level events into reducer operations.
//!
//! The field holds no state of its own. It borrows the rows and errors from the
//! parent form for rendering, and the parent form applies the operations it
//! produces.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use platter_resolver::{Resolver, SlotKey, SlotSnapshot};
use platter_schema::{
	CollectionFieldSpec, CollectionSchema, DateConfig, EntityId, ErrorState, FieldKind, FieldValue, ForeignKeyConfig,
	NumberConfig,
};

use crate::adapter::ErrorView;
use crate::store::{CollectionOp, CollectionState, IgnoreReason};

/// Widget name of one cell, e.g. `orders[2].status`.
///
/// Display only; writes never go through this string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowPath<'a> {
	pub collection: &'a str,
	pub index: usize,
	pub field: &'a str,
}

impl fmt::Display for RowPath<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}[{}].{}", self.collection, self.index, self.field)
	}
}

/// Typed view of one cell, per field kind.
#[derive(Clone, Debug)]
pub enum FieldInput<'a> {
	Text {
		value: &'a str,
	},
	Number {
		value: Option<f64>,
		config: &'a NumberConfig,
	},
	Boolean {
		value: bool,
	},
	Date {
		value: Option<NaiveDate>,
		config: &'a DateConfig,
	},
	ForeignKey {
		value: Option<&'a EntityId>,
		config: &'a ForeignKeyConfig,
		/// Candidate state of this cell's resolver slot, when one exists.
		candidates: Option<SlotSnapshot>,
	},
}

impl<'a> FieldInput<'a> {
	fn from_value(kind: &'a FieldKind, value: &'a FieldValue, candidates: Option<SlotSnapshot>) -> Self {
		match kind {
			FieldKind::Text => Self::Text {
				value: value.as_text().unwrap_or_default(),
			},
			FieldKind::Number(config) => Self::Number {
				value: value.as_number(),
				config,
			},
			FieldKind::Boolean => Self::Boolean {
				value: value.as_bool().unwrap_or(false),
			},
			FieldKind::Date(config) => Self::Date {
				value: value.as_date(),
				config,
			},
			FieldKind::ForeignKey(config) => Self::ForeignKey {
				value: value.as_reference(),
				config,
				candidates,
			},
		}
	}
}

/// Everything a renderer needs to draw one cell.
#[derive(Clone, Debug)]
pub struct FieldCell<'a> {
	pub spec: &'a CollectionFieldSpec,
	pub name: RowPath<'a>,
	pub input: FieldInput<'a>,
	pub error: Option<&'a str>,
}

impl FieldCell<'_> {
	pub fn field_name(&self) -> &str {
		&self.spec.field_name
	}

	pub fn label(&self) -> &str {
		&self.spec.label
	}
}

/// Collection-level information passed to [`FieldRenderer::render_collection`].
#[derive(Clone, Copy, Debug)]
pub struct CollectionHeader<'a> {
	pub name: &'a str,
	pub title: &'a str,
	pub len: usize,
	pub has_errors: bool,
}

/// Page-supplied rendering of cells, rows, and the collection frame.
///
/// The field calls [`render_field`](Self::render_field) once per field per row and
/// never inspects the output. Add/remove controls belong to the renderer; it
/// reports them back as [`CollectionEvent::AddRow`] and [`CollectionEvent::RemoveRow`].
pub trait FieldRenderer {
	type Cell;
	type Row;
	type Output;

	fn render_field(&mut self, cell: FieldCell<'_>) -> Self::Cell;

	fn render_row(&mut self, index: usize, cells: Vec<Self::Cell>) -> Self::Row;

	fn render_collection(&mut self, header: CollectionHeader<'_>, rows: Vec<Self::Row>) -> Self::Output;
}

/// New value produced by an input widget, typed per field kind.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldChange {
	Text(String),
	/// Non-finite input is stored as zero.
	Number(f64),
	Boolean(bool),
	Date(Option<NaiveDate>),
	ForeignKey(Option<EntityId>),
}

impl FieldChange {
	pub fn into_value(self) -> FieldValue {
		match self {
			Self::Text(text) => FieldValue::Text(text),
			Self::Number(n) if n.is_finite() => FieldValue::Number(n),
			Self::Number(_) => FieldValue::Number(0.0),
			Self::Boolean(b) => FieldValue::Boolean(b),
			Self::Date(date) => date.map_or(FieldValue::Null, FieldValue::Date),
			Self::ForeignKey(id) => id.map_or(FieldValue::Null, FieldValue::Reference),
		}
	}
}

/// User interaction with a collection field.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionEvent {
	AddRow,
	RemoveRow(usize),
	Change {
		index: usize,
		field: Arc<str>,
		change: FieldChange,
	},
}

impl CollectionEvent {
	pub fn change(index: usize, field: impl Into<Arc<str>>, change: FieldChange) -> Self {
		Self::Change {
			index,
			field: field.into(),
			change,
		}
	}
}

/// Borrowed view of one collection field, ready to render.
#[derive(Clone, Copy)]
pub struct CollectionField<'a> {
	schema: &'a CollectionSchema,
	rows: &'a CollectionState,
	errors: ErrorView<'a>,
	resolver: Option<&'a Resolver>,
}

impl<'a> CollectionField<'a> {
	pub fn new(schema: &'a CollectionSchema, rows: &'a CollectionState, errors: &'a ErrorState) -> Self {
		Self {
			schema,
			rows,
			errors: ErrorView::new(errors),
			resolver: None,
		}
	}

	/// Attaches the resolver whose slots back this field's foreign-key cells.
	pub fn with_resolver(mut self, resolver: &'a Resolver) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn schema(&self) -> &'a CollectionSchema {
		self.schema
	}

	pub fn errors(&self) -> ErrorView<'a> {
		self.errors
	}

	/// Renders every row, one cell per declared field.
	pub fn render<R: FieldRenderer>(&self, renderer: &mut R) -> R::Output {
		let name = &*self.schema.name;
		let mut rows = Vec::with_capacity(self.rows.len());
		for (index, row) in self.rows.rows().iter().enumerate() {
			let mut cells = Vec::with_capacity(self.schema.shape.len());
			for spec in self.schema.shape.fields() {
				let value = row.get(&spec.field_name).unwrap_or(&FieldValue::Null);
				let candidates = self
					.resolver
					.filter(|_| spec.kind.is_foreign_key())
					.and_then(|resolver| resolver.snapshot(&SlotKey::new(name, index, Arc::clone(&spec.field_name))));
				cells.push(renderer.render_field(FieldCell {
					spec,
					name: RowPath {
						collection: name,
						index,
						field: &spec.field_name,
					},
					input: FieldInput::from_value(&spec.kind, value, candidates),
					error: self.errors.error_for(index, &spec.field_name),
				}));
			}
			rows.push(renderer.render_row(index, cells));
		}
		renderer.render_collection(
			CollectionHeader {
				name,
				title: &self.schema.title,
				len: self.rows.len(),
				has_errors: self.errors.has_errors(),
			},
			rows,
		)
	}

	/// Resolver slots needed by the foreign-key cells currently on screen.
	pub fn reference_slots(&self) -> Vec<(SlotKey, Arc<str>)> {
		let mut slots = Vec::new();
		for index in 0..self.rows.len() {
			for spec in self.schema.shape.fields() {
				if let FieldKind::ForeignKey(config) = &spec.kind {
					let key = SlotKey::new(Arc::clone(&self.schema.name), index, Arc::clone(&spec.field_name));
					slots.push((key, Arc::clone(&config.relation)));
				}
			}
		}
		slots
	}
}

/// Translates an event into the reducer operation it stands for.
///
/// Foreign-key selections are checked against the cell's resolver slot when a
/// resolver is attached: only ids from the last successful lookup are accepted.
pub fn event_to_op(
	schema: &CollectionSchema,
	event: CollectionEvent,
	resolver: Option<&Resolver>,
) -> Result<CollectionOp, IgnoreReason> {
	match event {
		CollectionEvent::AddRow => Ok(CollectionOp::Append(schema.initial_row().clone())),
		CollectionEvent::RemoveRow(index) => Ok(CollectionOp::RemoveAt(index)),
		CollectionEvent::Change { index, field, change } => {
			if let (FieldChange::ForeignKey(Some(id)), Some(resolver)) = (&change, resolver) {
				let key = SlotKey::new(Arc::clone(&schema.name), index, Arc::clone(&field));
				let offered = resolver.snapshot(&key).is_some_and(|snapshot| snapshot.offers(id));
				if !offered {
					return Err(IgnoreReason::UnresolvedReference(id.clone()));
				}
			}
			Ok(CollectionOp::UpdateField {
				index,
				field,
				value: change.into_value(),
			})
		}
	}
}
