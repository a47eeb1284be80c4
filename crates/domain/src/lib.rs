//! Restaurant-management admin forms.
//!
//! Two parent forms carry nested collections: `users` (notifications, orders,
//! reservations, owned restaurants, staff positions) and `restaurants` (menu items,
//! orders, reservations, staff). Foreign keys point at the `restaurants` and
//! `users` relations; the back-reference to the parent record is never a row field.

mod collections;
mod directory;
mod forms;
mod relations;

use std::sync::Arc;

use chrono::NaiveDate;
use platter_schema::{DEFAULT_DATE_FORMAT, FormSchema, SchemaError};

pub use collections::{menu_items, notifications, orders, reservations, restaurants, staff};
pub use directory::StaticDirectory;
pub use forms::{restaurants_form, users_form};
pub use relations::{Parent, RESTAURANTS, USERS};

/// Inputs shared by every schema builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainOptions {
	/// Default for freshly appended date fields.
	pub today: NaiveDate,
	/// Display format for date pickers.
	pub date_format: Arc<str>,
}

impl DomainOptions {
	pub fn new(today: NaiveDate) -> Self {
		Self {
			today,
			date_format: Arc::from(DEFAULT_DATE_FORMAT),
		}
	}

	pub fn with_date_format(mut self, format: impl Into<Arc<str>>) -> Self {
		self.date_format = format.into();
		self
	}
}

/// Names of every parent form.
pub const FORM_NAMES: &[&str] = &["users", "restaurants"];

/// Builds the parent form named `name`.
pub fn form(name: &str, options: &DomainOptions) -> Option<Result<FormSchema, SchemaError>> {
	match name {
		"users" => Some(users_form(options)),
		"restaurants" => Some(restaurants_form(options)),
		_ => None,
	}
}

#[cfg(test)]
mod tests;
