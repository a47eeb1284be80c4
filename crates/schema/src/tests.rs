use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn orders_shape() -> RowShape {
	RowShape::new(vec![
		CollectionFieldSpec::new("status", "status", FieldKind::Text),
		CollectionFieldSpec::new("created_at", "created_at", FieldKind::date()),
		CollectionFieldSpec::new("restaurant_id", "restaurants", FieldKind::foreign_key("restaurants", "Select Restaurants")),
	])
	.expect("valid shape")
}

#[test]
fn shape_rejects_duplicate_fields() {
	let err = RowShape::new(vec![
		CollectionFieldSpec::new("role", "role", FieldKind::Text),
		CollectionFieldSpec::new("role", "again", FieldKind::Boolean),
	])
	.unwrap_err();
	assert_eq!(err, SchemaError::DuplicateField("role".into()));
}

#[test]
fn default_row_uses_kind_defaults() {
	let row = orders_shape().default_row(day(2024, 3, 1));
	assert_eq!(row.get("status"), Some(&FieldValue::Text(String::new())));
	assert_eq!(row.get("created_at"), Some(&FieldValue::Date(day(2024, 3, 1))));
	assert_eq!(row.get("restaurant_id"), Some(&FieldValue::Null));
	assert_eq!(row.len(), 3);
}

#[test]
fn conform_reports_extra_missing_and_mismatched_fields() {
	let shape = orders_shape();
	let today = day(2024, 3, 1);

	let extra = shape.default_row(today).with("id", "o-1");
	assert_eq!(shape.conform(&extra), Err(SchemaError::UnknownField("id".into())));

	let missing = Row::new().with("status", "open").with("created_at", today);
	assert_eq!(shape.conform(&missing), Err(SchemaError::MissingField("restaurant_id".into())));

	let mismatched = shape.default_row(today).with("status", true);
	assert!(matches!(shape.conform(&mismatched), Err(SchemaError::KindMismatch { expected: "text", found: "boolean", .. })));
}

#[test]
fn non_finite_numbers_are_not_accepted() {
	assert!(!FieldKind::number().accepts(&FieldValue::Number(f64::NAN)));
	assert!(FieldKind::number().accepts(&FieldValue::Number(2.5)));
	assert!(FieldKind::number().accepts(&FieldValue::Null));
}

#[test]
fn required_rule_treats_empty_text_as_missing() {
	let rule = FieldRule::required("name");
	assert_eq!(rule.evaluate(Some(&FieldValue::from(""))).as_deref(), Some("name is a required field"));
	assert_eq!(rule.evaluate(None).as_deref(), Some("name is a required field"));
	assert_eq!(rule.evaluate(Some(&FieldValue::from("Bistro"))), None);
	assert_eq!(FieldRule::optional("owner_id").evaluate(Some(&FieldValue::Null)), None);
}

#[test]
fn checks_run_after_presence() {
	let rule = FieldRule::required("party_size").check(Check::Integer).check(Check::Min(1.0));
	assert_eq!(rule.evaluate(Some(&FieldValue::Number(2.5))).as_deref(), Some("party_size must be an integer"));
	assert_eq!(
		rule.evaluate(Some(&FieldValue::Number(0.0))).as_deref(),
		Some("party_size must be greater than or equal to 1")
	);
	assert_eq!(rule.evaluate(Some(&FieldValue::Number(4.0))), None);
}

#[test]
fn validate_rows_trims_trailing_clean_rows() {
	let schema = RowSchema::new(vec![FieldRule::required("name")]);
	let rows = vec![
		Row::new().with("name", "ok"),
		Row::new().with("name", ""),
		Row::new().with("name", "ok"),
	];
	let state = schema.validate_rows(&rows);
	assert_eq!(state.len(), 2);
	assert!(state.get(0).is_some_and(RowErrors::is_empty));
	assert_eq!(state.get(1).and_then(|e| e.get("name")), Some("name is a required field"));
	assert_eq!(state.message_count(), 1);
}

#[test]
fn error_state_set_row_pads_and_trims() {
	let mut state = ErrorState::default();
	state.set_row(2, [("name", "required")].into_iter().collect());
	assert_eq!(state.len(), 3);
	assert!(!state.is_clean());

	state.set_row(2, RowErrors::default());
	assert!(state.is_empty());

	state.set_row(5, RowErrors::default());
	assert!(state.is_empty());
}

#[test]
fn error_state_truncate_keeps_leading_entries() {
	let mut state = ErrorState::from_rows(vec![
		[("a", "x")].into_iter().collect(),
		RowErrors::default(),
		[("b", "y")].into_iter().collect(),
	]);
	state.truncate(2);
	assert_eq!(state.len(), 1);
}

#[test]
fn row_from_json_drops_undeclared_keys_and_fills_absent() {
	let shape = orders_shape();
	let row = shape
		.row_from_json(&json!({
			"id": "o-9",
			"status": "served",
			"created_at": "2024-02-29T10:15:00Z",
		}))
		.expect("decodes");
	assert_eq!(row.get("status"), Some(&FieldValue::from("served")));
	assert_eq!(row.get("created_at"), Some(&FieldValue::Date(day(2024, 2, 29))));
	assert_eq!(row.get("restaurant_id"), Some(&FieldValue::Null));
	assert!(row.get("id").is_none());
	assert_eq!(shape.conform(&row), Ok(()));
}

#[test]
fn row_json_encoding_matches_wire_forms() {
	let row = Row::new()
		.with("created_at", day(2024, 1, 5))
		.with("restaurant_id", EntityId::from("r-1"))
		.with("party_size", 4.0);
	assert_eq!(
		row.to_json(),
		json!({ "created_at": "2024-01-05", "restaurant_id": "r-1", "party_size": 4.0 })
	);
}

#[test]
fn decode_rejects_wrong_json_types() {
	let err = FieldKind::Boolean.decode_json("read", &json!("yes")).unwrap_err();
	assert_eq!(
		err,
		SchemaError::InvalidJson {
			field: "read".into(),
			expected: "boolean"
		}
	);
	let err = FieldKind::date().decode_json("date", &json!("31/12/2024")).unwrap_err();
	assert!(matches!(err, SchemaError::InvalidDate { .. }));
	assert_eq!(FieldKind::number().decode_json("price", &json!("12.5")), Ok(FieldValue::Number(12.5)));
}

#[test]
fn collection_schema_requires_conforming_initializer() {
	let shape = orders_shape();
	let bad = Row::new().with("status", "");
	assert!(CollectionSchema::new("orders", "Orders", shape.clone(), bad, RowSchema::default()).is_err());

	let good = shape.default_row(day(2024, 3, 1));
	let schema = CollectionSchema::new("orders", "Orders", shape, good.clone(), RowSchema::default()).expect("valid");
	assert_eq!(schema.initial_row(), &good);
}

#[test]
fn numeric_strings_must_be_finite() {
	let expected = SchemaError::InvalidJson {
		field: "price".into(),
		expected: "number",
	};
	for raw in ["NaN", "inf", "-infinity"] {
		assert_eq!(FieldKind::number().decode_json("price", &json!(raw)), Err(expected.clone()));
	}
	assert_eq!(FieldKind::number().decode_json("price", &json!(" 7 ")), Ok(FieldValue::Number(7.0)));
}

#[test]
fn date_format_falls_back_when_unrenderable() {
	let date = day(2024, 3, 15);
	assert_eq!(DateConfig::default().format_date(date), "15/03/2024");

	let broken = DateConfig { format: "%Q".into() };
	assert!(!DateConfig::is_valid_format(&broken.format));
	assert_eq!(broken.format_date(date), "2024-03-15");
	assert!(DateConfig::is_valid_format("%Y-%m-%d"));
}
