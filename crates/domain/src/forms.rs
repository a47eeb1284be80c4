use platter_schema::{CollectionFieldSpec, FieldKind, FieldRule, FormSchema, Result, RowSchema, RowShape};

use crate::DomainOptions;
use crate::collections::{menu_items, notifications, orders, reservations, restaurants, staff};
use crate::relations::{Parent, USERS, users_fk};

fn required_text(names: &[(&str, &str)]) -> (Vec<CollectionFieldSpec>, Vec<FieldRule>) {
	names
		.iter()
		.map(|(name, label)| (CollectionFieldSpec::new(*name, *label, FieldKind::Text), FieldRule::required(*name)))
		.unzip()
}

/// User create/edit form.
pub fn users_form(options: &DomainOptions) -> Result<FormSchema> {
	let (fields, rules) =
		required_text(&[("role", "Role"), ("name", "Name"), ("email", "Email"), ("password", "Password")]);
	let scalars = RowShape::new(fields)?;
	let defaults = scalars.default_row(options.today);
	FormSchema::new("users", "Users", scalars, RowSchema::new(rules), defaults, vec![
		notifications(options)?,
		orders(options, Parent::User)?,
		reservations(options, Parent::User)?,
		restaurants(options)?,
		staff(options, Parent::User)?,
	])
}

/// Restaurant create/edit form.
pub fn restaurants_form(options: &DomainOptions) -> Result<FormSchema> {
	let (mut fields, mut rules) = required_text(&[
		("name", "Name"),
		("location", "Location"),
		("contact_information", "Contact Information"),
		("operating_hours", "Operating Hours"),
	]);
	fields.push(CollectionFieldSpec::new("owner_id", USERS, users_fk()));
	rules.push(FieldRule::optional("owner_id"));

	let scalars = RowShape::new(fields)?;
	let defaults = scalars.default_row(options.today);
	FormSchema::new("restaurants", "Restaurants", scalars, RowSchema::new(rules), defaults, vec![
		menu_items(options)?,
		orders(options, Parent::Restaurant)?,
		reservations(options, Parent::Restaurant)?,
		staff(options, Parent::Restaurant)?,
	])
}
