use platter_schema::{
	Check, CollectionFieldSpec, CollectionSchema, DateConfig, FieldKind, FieldRule, Result, RowSchema, RowShape,
};

use crate::DomainOptions;
use crate::relations::Parent;

/// Field list plus rules, assembled in declaration order.
struct Builder<'a> {
	options: &'a DomainOptions,
	fields: Vec<CollectionFieldSpec>,
	rules: Vec<FieldRule>,
}

impl<'a> Builder<'a> {
	fn new(options: &'a DomainOptions) -> Self {
		Self {
			options,
			fields: Vec::new(),
			rules: Vec::new(),
		}
	}

	fn field(mut self, name: &str, label: &str, kind: FieldKind, rule: FieldRule) -> Self {
		self.fields.push(CollectionFieldSpec::new(name, label, kind));
		self.rules.push(rule);
		self
	}

	fn text(self, name: &str) -> Self {
		self.field(name, name, FieldKind::Text, FieldRule::required(name))
	}

	fn date(self, name: &str) -> Self {
		let kind = FieldKind::Date(DateConfig {
			format: self.options.date_format.clone(),
		});
		self.field(name, name, kind, FieldRule::required(name))
	}

	fn reference(self, name: &str, label: &str, kind: FieldKind) -> Self {
		self.field(name, label, kind, FieldRule::optional(name))
	}

	fn build(self, name: &str, title: &str) -> Result<CollectionSchema> {
		let shape = RowShape::new(self.fields)?;
		let initial = shape.default_row(self.options.today);
		CollectionSchema::new(name, title, shape, initial, RowSchema::new(self.rules))
	}
}

pub fn notifications(options: &DomainOptions) -> Result<CollectionSchema> {
	Builder::new(options)
		.text("message")
		.field("read", "read", FieldKind::Boolean, FieldRule::required("read"))
		.date("created_at")
		.build("notifications", "Notifications")
}

pub fn orders(options: &DomainOptions, parent: Parent) -> Result<CollectionSchema> {
	let (column, label, kind) = parent.counterpart("user_id");
	Builder::new(options)
		.text("status")
		.text("special_requests")
		.date("created_at")
		.date("updated_at")
		.reference(column, label, kind)
		.build("orders", "Orders")
}

pub fn reservations(options: &DomainOptions, parent: Parent) -> Result<CollectionSchema> {
	let (column, label, kind) = parent.counterpart("customer_id");
	Builder::new(options)
		.date("date")
		.date("time")
		.field(
			"party_size",
			"party_size",
			FieldKind::integer(),
			FieldRule::required("party_size").check(Check::Integer),
		)
		.date("created_at")
		.date("updated_at")
		.reference(column, label, kind)
		.build("reservations", "Reservations")
}

/// Restaurants owned by the parent user.
pub fn restaurants(options: &DomainOptions) -> Result<CollectionSchema> {
	Builder::new(options)
		.text("name")
		.text("location")
		.text("contact_information")
		.text("operating_hours")
		.build("restaurants", "Restaurants")
}

pub fn staff(options: &DomainOptions, parent: Parent) -> Result<CollectionSchema> {
	let (column, label, kind) = parent.counterpart("user_id");
	Builder::new(options)
		.text("role")
		.reference(column, label, kind)
		.build("staff", "Staff")
}

pub fn menu_items(options: &DomainOptions) -> Result<CollectionSchema> {
	Builder::new(options)
		.text("name")
		.text("description")
		.field("price", "price", FieldKind::number(), FieldRule::required("price"))
		.field("image_url", "image_url", FieldKind::Text, FieldRule::optional("image_url"))
		.build("menu_items", "Menu Items")
}
