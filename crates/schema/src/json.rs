//! Conversion between typed rows and JSON entity payloads.
//!
//! Dates travel as `YYYY-MM-DD` (RFC 3339 timestamps are accepted on input and
//! truncated to their date), references as id strings.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::kind::FieldKind;
use crate::shape::{Row, RowShape};
use crate::value::{EntityId, FieldValue};

const ISO_DATE: &str = "%Y-%m-%d";

impl FieldKind {
	/// Decodes a JSON value into a value of this kind.
	pub fn decode_json(&self, field: &str, value: &Value) -> Result<FieldValue> {
		if value.is_null() {
			return Ok(FieldValue::Null);
		}
		let invalid = |expected| SchemaError::InvalidJson {
			field: Arc::from(field),
			expected,
		};
		match self {
			Self::Text => value
				.as_str()
				.map(|s| FieldValue::Text(s.to_owned()))
				.ok_or_else(|| invalid("string")),
			Self::Number(_) => match value {
				Value::Number(n) => n.as_f64().map(FieldValue::Number).ok_or_else(|| invalid("number")),
				Value::String(s) => s
					.trim()
					.parse::<f64>()
					.ok()
					.filter(|n| n.is_finite())
					.map(FieldValue::Number)
					.ok_or_else(|| invalid("number")),
				_ => Err(invalid("number")),
			},
			Self::Boolean => value.as_bool().map(FieldValue::Boolean).ok_or_else(|| invalid("boolean")),
			Self::Date(_) => {
				let raw = value.as_str().ok_or_else(|| invalid("date string"))?;
				parse_date(field, raw).map(FieldValue::Date)
			}
			Self::ForeignKey(_) => match value {
				Value::String(s) => Ok(FieldValue::Reference(EntityId::new(s.as_str()))),
				Value::Number(n) => Ok(FieldValue::Reference(EntityId::new(n.to_string()))),
				_ => Err(invalid("id")),
			},
		}
	}
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
	NaiveDate::parse_from_str(raw, ISO_DATE)
		.or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
		.map_err(|_| SchemaError::InvalidDate {
			field: Arc::from(field),
			input: raw.to_owned(),
		})
}

impl FieldValue {
	pub fn to_json(&self) -> Value {
		match self {
			Self::Null => Value::Null,
			Self::Text(text) => Value::String(text.clone()),
			Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
			Self::Boolean(b) => Value::Bool(*b),
			Self::Date(d) => Value::String(d.format(ISO_DATE).to_string()),
			Self::Reference(id) => Value::String(id.as_str().to_owned()),
		}
	}
}

impl RowShape {
	/// Decodes a JSON object into a conforming row.
	///
	/// Keys the shape does not declare (server-side ids, parent back-references)
	/// are dropped; declared keys that are absent become `Null`.
	pub fn row_from_json(&self, value: &Value) -> Result<Row> {
		let object = value.as_object().ok_or_else(|| SchemaError::InvalidJson {
			field: Arc::from("row"),
			expected: "object",
		})?;
		for key in object.keys().filter(|key| self.field(key).is_none()) {
			tracing::trace!(field = %key, "dropping undeclared row field");
		}
		self.fields()
			.iter()
			.map(|spec| {
				let value = match object.get(&*spec.field_name) {
					Some(raw) => spec.kind.decode_json(&spec.field_name, raw)?,
					None => FieldValue::Null,
				};
				Ok((Arc::clone(&spec.field_name), value))
			})
			.collect()
	}

	/// Decodes a JSON array of row objects. `null` decodes as an empty list.
	pub fn rows_from_json(&self, collection: &str, value: &Value) -> Result<Vec<Row>> {
		match value {
			Value::Null => Ok(Vec::new()),
			Value::Array(items) => items.iter().map(|item| self.row_from_json(item)).collect(),
			_ => Err(SchemaError::InvalidJson {
				field: Arc::from(collection),
				expected: "array",
			}),
		}
	}
}

impl Row {
	pub fn to_json(&self) -> Value {
		Value::Object(self.iter().map(|(field, value)| (field.to_string(), value.to_json())).collect::<Map<_, _>>())
	}
}
