use std::fmt::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::value::FieldValue;

/// Date display format used by the date pickers unless configured otherwise.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Numeric field configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberConfig {
	/// Renderers should step in whole units.
	pub integer: bool,
	pub min: Option<f64>,
	pub max: Option<f64>,
}

/// Date field configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateConfig {
	/// `chrono` format string for display.
	pub format: Arc<str>,
}

impl DateConfig {
	/// Returns false when chrono cannot render `format`.
	pub fn is_valid_format(format: &str) -> bool {
		!StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
	}

	/// Renders `date` with the configured format, falling back to `YYYY-MM-DD`
	/// when the format cannot be rendered.
	pub fn format_date(&self, date: NaiveDate) -> String {
		let mut out = String::new();
		match write!(out, "{}", date.format(&self.format)) {
			Ok(()) => out,
			Err(_) => {
				tracing::debug!(format = %self.format, "unrenderable date format");
				date.format("%Y-%m-%d").to_string()
			}
		}
	}
}

impl Default for DateConfig {
	fn default() -> Self {
		Self {
			format: Arc::from(DEFAULT_DATE_FORMAT),
		}
	}
}

/// Foreign-key field configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignKeyConfig {
	/// Name of the referenced entity set, e.g. `restaurants`.
	pub relation: Arc<str>,
	/// Prompt shown while nothing is selected.
	pub placeholder: Arc<str>,
	/// Record fields joined to build an option label. Empty means "show the id".
	pub display_fields: Vec<Arc<str>>,
}

impl ForeignKeyConfig {
	pub fn new(relation: impl Into<Arc<str>>, placeholder: impl Into<Arc<str>>) -> Self {
		Self {
			relation: relation.into(),
			placeholder: placeholder.into(),
			display_fields: Vec::new(),
		}
	}

	pub fn with_display_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		self.display_fields = fields.into_iter().map(Into::into).collect();
		self
	}
}

/// Kind of a row field, with kind-specific configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
	Text,
	Number(NumberConfig),
	Boolean,
	Date(DateConfig),
	ForeignKey(ForeignKeyConfig),
}

impl FieldKind {
	pub fn number() -> Self {
		Self::Number(NumberConfig::default())
	}

	pub fn integer() -> Self {
		Self::Number(NumberConfig {
			integer: true,
			..NumberConfig::default()
		})
	}

	pub fn date() -> Self {
		Self::Date(DateConfig::default())
	}

	pub fn foreign_key(relation: impl Into<Arc<str>>, placeholder: impl Into<Arc<str>>) -> Self {
		Self::ForeignKey(ForeignKeyConfig::new(relation, placeholder))
	}

	/// Kind name used in diagnostics.
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Number(_) => "number",
			Self::Boolean => "boolean",
			Self::Date(_) => "date",
			Self::ForeignKey(_) => "reference",
		}
	}

	/// Value a freshly initialized field of this kind holds.
	///
	/// Dates start at `today`; foreign keys start unselected.
	pub fn default_value(&self, today: NaiveDate) -> FieldValue {
		match self {
			Self::Text => FieldValue::Text(String::new()),
			Self::Number(_) => FieldValue::Number(0.0),
			Self::Boolean => FieldValue::Boolean(false),
			Self::Date(_) => FieldValue::Date(today),
			Self::ForeignKey(_) => FieldValue::Null,
		}
	}

	/// Returns true when `value` may be stored in a field of this kind.
	pub fn accepts(&self, value: &FieldValue) -> bool {
		match (self, value) {
			(_, FieldValue::Null) => true,
			(Self::Text, FieldValue::Text(_)) => true,
			(Self::Number(_), FieldValue::Number(n)) => n.is_finite(),
			(Self::Boolean, FieldValue::Boolean(_)) => true,
			(Self::Date(_), FieldValue::Date(_)) => true,
			(Self::ForeignKey(_), FieldValue::Reference(_)) => true,
			_ => false,
		}
	}

	pub const fn is_foreign_key(&self) -> bool {
		matches!(self, Self::ForeignKey(_))
	}
}
