use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::{Result, SchemaError};
use crate::kind::FieldKind;
use crate::value::FieldValue;

/// One column of a nested row.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionFieldSpec {
	pub field_name: Arc<str>,
	pub label: Arc<str>,
	pub kind: FieldKind,
}

impl CollectionFieldSpec {
	pub fn new(field_name: impl Into<Arc<str>>, label: impl Into<Arc<str>>, kind: FieldKind) -> Self {
		Self {
			field_name: field_name.into(),
			label: label.into(),
			kind,
		}
	}
}

/// Ordered field list every row of a collection conforms to.
#[derive(Clone, Debug, PartialEq)]
pub struct RowShape {
	fields: Arc<[CollectionFieldSpec]>,
}

impl RowShape {
	/// Builds a shape, rejecting duplicate field names.
	pub fn new(fields: Vec<CollectionFieldSpec>) -> Result<Self> {
		for (i, spec) in fields.iter().enumerate() {
			if fields[..i].iter().any(|earlier| earlier.field_name == spec.field_name) {
				return Err(SchemaError::DuplicateField(Arc::clone(&spec.field_name)));
			}
		}
		Ok(Self { fields: fields.into() })
	}

	pub fn fields(&self) -> &[CollectionFieldSpec] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&CollectionFieldSpec> {
		self.fields.iter().find(|spec| &*spec.field_name == name)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Row holding every field's kind default.
	pub fn default_row(&self, today: NaiveDate) -> Row {
		self.fields
			.iter()
			.map(|spec| (Arc::clone(&spec.field_name), spec.kind.default_value(today)))
			.collect()
	}

	/// Checks that a single value may be written to `field`.
	pub fn check_value(&self, field: &str, value: &FieldValue) -> Result<()> {
		let spec = self.field(field).ok_or_else(|| SchemaError::UnknownField(Arc::from(field)))?;
		if spec.kind.accepts(value) {
			Ok(())
		} else {
			Err(SchemaError::KindMismatch {
				field: Arc::clone(&spec.field_name),
				expected: spec.kind.name(),
				found: value.type_name(),
			})
		}
	}

	/// Checks that `row` has exactly this shape's keys with acceptable values.
	pub fn conform(&self, row: &Row) -> Result<()> {
		if let Some(extra) = row.field_names().find(|name| self.field(name).is_none()) {
			return Err(SchemaError::UnknownField(Arc::clone(extra)));
		}
		for spec in self.fields.iter() {
			let value = row
				.get(&spec.field_name)
				.ok_or_else(|| SchemaError::MissingField(Arc::clone(&spec.field_name)))?;
			self.check_value(&spec.field_name, value)?;
		}
		Ok(())
	}
}

/// One nested sub-record: field name to value, in shape order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
	values: IndexMap<Arc<str>, FieldValue>,
}

impl Row {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert, used to assemble initializers and fixtures.
	pub fn with(mut self, field: impl Into<Arc<str>>, value: impl Into<FieldValue>) -> Self {
		self.values.insert(field.into(), value.into());
		self
	}

	pub fn get(&self, field: &str) -> Option<&FieldValue> {
		self.values.get(field)
	}

	/// Mutable access to an existing field. Never creates keys.
	pub fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
		self.values.get_mut(field)
	}

	pub fn field_names(&self) -> impl Iterator<Item = &Arc<str>> {
		self.values.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &FieldValue)> {
		self.values.iter()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<K: Into<Arc<str>>> FromIterator<(K, FieldValue)> for Row {
	fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
		}
	}
}
