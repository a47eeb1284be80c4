//! Parent form: owner of the value tree and of every collection's rows and errors.
//!
//! # Invariants
//!
//! * Must route every row mutation through [`CollectionState::apply`].
//! * Must keep each collection's [`ErrorState`] no longer than its rows.
//! * Must not attach errors to a freshly appended row before any edit or validation.
//! * Must refuse submission while any error is present.

use std::sync::Arc;

use indexmap::IndexMap;
use platter_resolver::Resolver;
use platter_schema::{ErrorState, FieldValue, FormSchema, Row, RowErrors};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FormError, Result};
use crate::field::{CollectionEvent, CollectionField, event_to_op};
use crate::store::{CollectionState, OpOutcome};

/// When row errors are recomputed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
	/// Re-validate an edited row (or scalar) as soon as it changes.
	#[default]
	OnChange,
	/// Only validate on [`FormModel::validate`] and submit.
	OnSubmit,
}

/// The parent form's value tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
	pub scalars: Row,
	collections: IndexMap<Arc<str>, CollectionState>,
}

impl FormValues {
	/// Create-flow values: scalar defaults and empty collections.
	pub fn initial(schema: &FormSchema) -> Self {
		Self {
			scalars: schema.scalar_defaults.clone(),
			collections: schema
				.collections
				.iter()
				.map(|c| (Arc::clone(&c.name), CollectionState::new()))
				.collect(),
		}
	}

	/// Edit-flow values decoded from a fetched entity.
	pub fn from_json(schema: &FormSchema, entity: &Value) -> Result<Self> {
		let scalars = schema.scalars.row_from_json(entity)?;
		let mut collections = IndexMap::with_capacity(schema.collections.len());
		for collection in &schema.collections {
			let raw = entity.get(&*collection.name).unwrap_or(&Value::Null);
			let rows = collection.shape.rows_from_json(&collection.name, raw)?;
			collections.insert(Arc::clone(&collection.name), CollectionState::from_rows(&collection.shape, rows)?);
		}
		Ok(Self { scalars, collections })
	}

	pub fn collection(&self, name: &str) -> Option<&CollectionState> {
		self.collections.get(name)
	}

	/// Request body: scalars plus one array per collection.
	pub fn to_json(&self) -> Value {
		let mut body = match self.scalars.to_json() {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		for (name, state) in &self.collections {
			body.insert(name.to_string(), Value::Array(state.rows().iter().map(Row::to_json).collect()));
		}
		Value::Object(body)
	}
}

/// Validation errors for the whole form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
	pub scalars: RowErrors,
	collections: IndexMap<Arc<str>, ErrorState>,
	/// Error reported by the last failed submission.
	pub submit: Option<String>,
}

impl FormErrors {
	pub fn collection(&self, name: &str) -> Option<&ErrorState> {
		self.collections.get(name)
	}

	/// Number of field messages across scalars and collections.
	pub fn message_count(&self) -> usize {
		self.scalars.len() + self.collections.values().map(ErrorState::message_count).sum::<usize>()
	}

	pub fn is_clean(&self) -> bool {
		self.message_count() == 0
	}
}

/// A create or edit form bound to one [`FormSchema`].
#[derive(Clone, Debug)]
pub struct FormModel {
	schema: Arc<FormSchema>,
	values: FormValues,
	initial: FormValues,
	errors: FormErrors,
	mode: ValidationMode,
	submitting: bool,
}

impl FormModel {
	/// Create flow: defaults and empty collections.
	pub fn create(schema: Arc<FormSchema>) -> Self {
		let values = FormValues::initial(&schema);
		Self::from_values(schema, values)
	}

	/// Edit flow: values populated from a fetched entity.
	pub fn edit(schema: Arc<FormSchema>, entity: &Value) -> Result<Self> {
		let values = FormValues::from_json(&schema, entity)?;
		Ok(Self::from_values(schema, values))
	}

	fn from_values(schema: Arc<FormSchema>, values: FormValues) -> Self {
		let errors = FormErrors {
			collections: schema
				.collections
				.iter()
				.map(|c| (Arc::clone(&c.name), ErrorState::default()))
				.collect(),
			..FormErrors::default()
		};
		Self {
			schema,
			initial: values.clone(),
			values,
			errors,
			mode: ValidationMode::default(),
			submitting: false,
		}
	}

	pub fn with_mode(mut self, mode: ValidationMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn schema(&self) -> &FormSchema {
		&self.schema
	}

	pub fn values(&self) -> &FormValues {
		&self.values
	}

	pub fn errors(&self) -> &FormErrors {
		&self.errors
	}

	pub fn is_submitting(&self) -> bool {
		self.submitting
	}

	pub fn is_dirty(&self) -> bool {
		self.values != self.initial
	}

	pub fn collection(&self, name: &str) -> Option<&CollectionState> {
		self.values.collection(name)
	}

	pub fn collection_errors(&self, name: &str) -> Option<&ErrorState> {
		self.errors.collection(name)
	}

	/// Borrowed collection field for rendering.
	pub fn collection_field(&self, name: &str) -> Option<CollectionField<'_>> {
		let schema = self.schema.collection(name)?;
		let rows = self.values.collection(name)?;
		let errors = self.errors.collection(name)?;
		Some(CollectionField::new(schema, rows, errors))
	}

	/// Sets one top-level field.
	pub fn set_scalar(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
		let value = value.into();
		self.schema.scalars.check_value(field, &value)?;
		if let Some(slot) = self.values.scalars.get_mut(field) {
			*slot = value;
		}
		if self.mode == ValidationMode::OnChange {
			self.errors.scalars = self.schema.scalar_rules.validate(&self.values.scalars);
		}
		Ok(())
	}

	/// Applies a collection event to the value tree.
	///
	/// Events that cannot apply (out-of-range removals, ill-typed changes,
	/// unresolved foreign keys) are reported as [`OpOutcome::Ignored`] and leave
	/// the tree untouched.
	pub fn dispatch(
		&mut self,
		collection: &str,
		event: CollectionEvent,
		resolver: Option<&Resolver>,
	) -> Result<OpOutcome> {
		let schema = self
			.schema
			.collection(collection)
			.ok_or_else(|| FormError::UnknownCollection(Arc::from(collection)))?;
		let state = self
			.values
			.collections
			.get_mut(collection)
			.ok_or_else(|| FormError::UnknownCollection(Arc::from(collection)))?;
		let errors = self.errors.collections.entry(Arc::clone(&schema.name)).or_default();

		let edited = match &event {
			CollectionEvent::Change { index, .. } => Some(*index),
			_ => None,
		};
		let op = match event_to_op(schema, event, resolver) {
			Ok(op) => op,
			Err(reason) => {
				tracing::debug!(collection, ?reason, "collection event rejected");
				return Ok(OpOutcome::Ignored(reason));
			}
		};
		let outcome = state.apply(&schema.shape, op);
		if !outcome.is_applied() {
			return Ok(outcome);
		}

		errors.truncate(state.len());
		if let Some(index) = edited
			&& self.mode == ValidationMode::OnChange
			&& let Some(row) = state.get(index)
		{
			errors.set_row(index, schema.rules.validate(row));
		}
		if let Some(resolver) = resolver {
			resolver.retain_rows(collection, state.len());
		}
		tracing::trace!(collection, rows = state.len(), "collection updated");
		Ok(outcome)
	}

	/// Recomputes every error. Returns true when the form is valid.
	pub fn validate(&mut self) -> bool {
		self.errors.scalars = self.schema.scalar_rules.validate(&self.values.scalars);
		for collection in &self.schema.collections {
			let rows = self.values.collection(&collection.name).map(CollectionState::rows).unwrap_or_default();
			self.errors
				.collections
				.insert(Arc::clone(&collection.name), collection.rules.validate_rows(rows));
		}
		self.errors.is_clean()
	}

	pub fn is_valid(&self) -> bool {
		self.errors.is_clean()
	}

	/// Validates and, if clean, marks the form as submitting and returns the body.
	pub fn begin_submit(&mut self) -> Result<Value> {
		if self.submitting {
			return Err(FormError::SubmitInProgress);
		}
		self.errors.submit = None;
		if !self.validate() {
			let messages = self.errors.message_count();
			tracing::debug!(form = %self.schema.name, messages, "submit blocked by validation");
			return Err(FormError::Invalid { messages });
		}
		self.submitting = true;
		Ok(self.values.to_json())
	}

	/// Records the outcome of the request started by [`begin_submit`](Self::begin_submit).
	///
	/// Success resets the form to its initial values; failure keeps the edits
	/// and surfaces the message as a form-level error.
	pub fn finish_submit(&mut self, outcome: std::result::Result<(), String>) {
		if !self.submitting {
			tracing::warn!(form = %self.schema.name, "finish_submit without pending submit");
			return;
		}
		self.submitting = false;
		match outcome {
			Ok(()) => {
				tracing::debug!(form = %self.schema.name, "submit succeeded");
				self.reset();
			}
			Err(message) => {
				tracing::warn!(form = %self.schema.name, %message, "submit failed");
				self.errors.submit = Some(message);
			}
		}
	}

	/// Restores initial values and clears every error.
	pub fn reset(&mut self) {
		self.values = self.initial.clone();
		self.errors.scalars = RowErrors::default();
		self.errors.submit = None;
		for errors in self.errors.collections.values_mut() {
			*errors = ErrorState::default();
		}
	}
}
