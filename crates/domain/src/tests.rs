use std::sync::Arc;

use chrono::NaiveDate;
use platter_form::{CollectionEvent, FieldChange, FormModel};
use platter_resolver::{EntityFetcher, FetchError, Resolver, ResolverConfig, SlotKey};
use platter_schema::{FieldKind, FieldValue};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

fn options() -> DomainOptions {
	DomainOptions::new(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"))
}

fn field_names(form: &platter_schema::FormSchema, collection: &str) -> Vec<String> {
	form.collection(collection)
		.map(|c| c.shape.fields().iter().map(|f| f.field_name.to_string()).collect())
		.unwrap_or_default()
}

#[test]
fn users_form_declares_every_collection() {
	let form = users_form(&options()).expect("users form");
	let names: Vec<&str> = form.collection_names().collect();
	assert_eq!(names, ["notifications", "orders", "reservations", "restaurants", "staff"]);
	assert_eq!(field_names(&form, "orders"), [
		"status",
		"special_requests",
		"created_at",
		"updated_at",
		"restaurant_id"
	]);
	assert_eq!(field_names(&form, "staff"), ["role", "restaurant_id"]);
}

#[test]
fn restaurant_collections_reference_users() {
	let form = restaurants_form(&options()).expect("restaurants form");
	assert_eq!(field_names(&form, "orders").last().map(String::as_str), Some("user_id"));
	assert_eq!(field_names(&form, "reservations").last().map(String::as_str), Some("customer_id"));

	let owner = form.scalars.field("owner_id").expect("owner field");
	let FieldKind::ForeignKey(config) = &owner.kind else {
		panic!("owner_id must be a foreign key");
	};
	assert_eq!(&*config.relation, USERS);
	assert_eq!(&*config.placeholder, "Select Users");
}

#[test]
fn initial_rows_use_kind_defaults() {
	let options = options();
	let schema = reservations(&options, Parent::User).expect("reservations");
	let row = schema.initial_row();
	assert_eq!(row.get("date"), Some(&FieldValue::Date(options.today)));
	assert_eq!(row.get("party_size"), Some(&FieldValue::Number(0.0)));
	assert_eq!(row.get("restaurant_id"), Some(&FieldValue::Null));
}

#[test]
fn date_format_reaches_every_date_field() {
	let options = options().with_date_format("%Y-%m-%d");
	let form = users_form(&options).expect("users form");
	let formats: Vec<&str> = form
		.collections
		.iter()
		.flat_map(|c| c.shape.fields())
		.filter_map(|f| match &f.kind {
			FieldKind::Date(config) => Some(&*config.format),
			_ => None,
		})
		.collect();
	assert!(!formats.is_empty());
	assert!(formats.iter().all(|format| *format == "%Y-%m-%d"));
}

#[test]
fn unknown_form_name() {
	assert!(form("invoices", &options()).is_none());
	for name in FORM_NAMES {
		assert!(form(name, &options()).is_some_and(|built| built.is_ok()));
	}
}

#[test]
fn required_fields_follow_declarations() {
	let schema = menu_items(&options()).expect("menu items");
	let errors = schema.rules.validate(schema.initial_row());
	assert_eq!(errors.get("name"), Some("name is a required field"));
	assert_eq!(errors.get("image_url"), None);
	assert_eq!(errors.get("price"), None);
}

fn directory_json() -> serde_json::Value {
	json!({
		"restaurants": [
			{ "id": "r-1", "name": "Trattoria Roma", "location": "Main St" },
			{ "id": "r-2", "name": "Sushi Go", "rating": 4.5, "tags": ["fish"] },
			{ "id": 3, "name": "Burger Barn", "open": true },
		],
		"users": [],
	})
}

#[test]
fn directory_load_stringifies_scalars() {
	let directories = StaticDirectory::load(&directory_json()).expect("valid directory");
	let keys: Vec<&str> = directories.keys().map(|k| &**k).collect();
	assert_eq!(keys, ["restaurants", "users"]);

	let restaurants = &directories["restaurants"];
	assert_eq!(restaurants.records().len(), 3);
	assert_eq!(restaurants.records()[1].field("rating"), Some("4.5"));
	assert_eq!(restaurants.records()[1].field("tags"), None);
	assert_eq!(restaurants.records()[2].id.as_str(), "3");
	assert_eq!(restaurants.records()[2].field("open"), Some("true"));
}

#[test]
fn directory_load_rejects_malformed_input() {
	assert!(matches!(StaticDirectory::load(&json!([])), Err(FetchError::Malformed(_))));
	assert!(matches!(StaticDirectory::load(&json!({ "users": {} })), Err(FetchError::Malformed(_))));
	assert!(matches!(
		StaticDirectory::load(&json!({ "users": [{ "name": "Ada" }] })),
		Err(FetchError::Malformed(_))
	));
}

#[tokio::test]
async fn directory_filters_and_pages() {
	let directories = StaticDirectory::load(&directory_json()).expect("valid directory");
	let restaurants = &directories["restaurants"];

	let page = restaurants.fetch(None, 2).await.expect("fetch");
	assert_eq!(page.len(), 2);

	let hits = restaurants.fetch(Some("SUSHI"), 20).await.expect("fetch");
	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].id.as_str(), "r-2");
}

#[tokio::test]
async fn edit_user_and_pick_restaurant() {
	let options = options();
	let schema = Arc::new(users_form(&options).expect("users form"));
	let mut resolver = Resolver::new(ResolverConfig {
		debounce_ms: 0,
		..ResolverConfig::default()
	});
	StaticDirectory::register_all(&mut resolver, StaticDirectory::load(&directory_json()).expect("directory"));
	assert!(resolver.has_relation(RESTAURANTS));

	let entity = json!({
		"role": "owner", "name": "Ada", "email": "ada@example.com", "password": "secret",
		"staff": [{ "role": "chef", "restaurant_id": null }],
	});
	let mut form = FormModel::edit(schema, &entity).expect("edit");

	let slot = resolver.slot(&SlotKey::new("staff", 0, "restaurant_id"), RESTAURANTS).expect("slot");
	let found = slot.search(Some("trattoria")).await.expect("search");
	assert_eq!(found.len(), 1);

	let pick = CollectionEvent::change(0, "restaurant_id", FieldChange::ForeignKey(Some("r-1".into())));
	assert!(form.dispatch("staff", pick, Some(&resolver)).expect("dispatch").is_applied());

	let body = form.begin_submit().expect("valid form");
	assert_eq!(body["staff"], json!([{ "role": "chef", "restaurant_id": "r-1" }]));
}
