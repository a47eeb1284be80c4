use platter_schema::{ErrorState, FieldValue, Row, RowErrors};

use crate::adapter::ErrorView;
use crate::field::{CollectionEvent, FieldChange};
use crate::store::{CollectionState, IgnoreReason, OpOutcome};
use crate::tests::{d0, notifications, users_form};

/// Must treat removal past the end as a no-op.
///
/// - Enforced in: `CollectionState::apply`
/// - Failure symptom: A double-clicked remove control deletes a neighbouring row or panics.
#[cfg_attr(test, test)]
pub(crate) fn test_remove_out_of_bounds_is_noop() {
	let schema = notifications();
	let mut state = CollectionState::new();
	state.append(&schema.shape, schema.initial_row().clone());
	let before = state.clone();

	let outcome = state.remove_at(&schema.shape, 1);
	assert_eq!(outcome, OpOutcome::Ignored(IgnoreReason::IndexOutOfBounds { index: 1, len: 1 }));
	assert_eq!(state, before);
	assert_eq!(state.remove_at(&schema.shape, usize::MAX), OpOutcome::Ignored(IgnoreReason::IndexOutOfBounds {
		index: usize::MAX,
		len: 1
	}));
}

/// Must replace exactly one field of exactly one row on update.
///
/// - Enforced in: `CollectionState::apply`
/// - Failure symptom: Editing one row bleeds into siblings or resets other fields.
#[cfg_attr(test, test)]
pub(crate) fn test_update_field_isolated() {
	let schema = notifications();
	let mut state = CollectionState::new();
	for _ in 0..3 {
		state.append(&schema.shape, schema.initial_row().clone());
	}
	let before = state.clone();

	assert!(state.update_field(&schema.shape, 1, "message", "hello").is_applied());

	assert_eq!(state.get(1).and_then(|r| r.get("message")), Some(&FieldValue::from("hello")));
	assert_eq!(state.get(1).and_then(|r| r.get("read")), before.get(1).and_then(|r| r.get("read")));
	assert_eq!(state.get(0), before.get(0));
	assert_eq!(state.get(2), before.get(2));
}

/// Must answer "no error" for rows past the end of the error state.
///
/// - Enforced in: `ErrorView::error_for`
/// - Failure symptom: Freshly appended rows crash the error lookup or show another row's error.
#[cfg_attr(test, test)]
pub(crate) fn test_error_for_past_error_state_is_none() {
	let errors = ErrorState::from_rows(vec![RowErrors::default(), [("name", "required")].into_iter().collect()]);
	let view = ErrorView::new(&errors);

	assert_eq!(view.error_for(2, "name"), None);
	assert_eq!(view.error_for(1, "name"), Some("required"));
	assert_eq!(view.error_for(0, "name"), None);
	assert_eq!(view.error_for(1, "email"), None);

	assert_eq!(view.row_errors(0), None);
	assert_eq!(view.row_errors(1).map(RowErrors::len), Some(1));
	assert_eq!(view.row_errors(2), None);
}

/// Must not attach errors to a freshly appended row.
///
/// - Enforced in: `FormModel::dispatch`
/// - Failure symptom: "required" messages appear on a row the user has not touched.
#[cfg_attr(test, test)]
pub(crate) fn test_appended_row_has_no_error() {
	let mut form = crate::FormModel::create(users_form());
	form.dispatch("notifications", CollectionEvent::AddRow, None).expect("known collection");
	form.validate();
	assert!(form.collection_field("notifications").expect("field").errors().error_for(0, "message").is_some());

	form.dispatch("notifications", CollectionEvent::AddRow, None).expect("known collection");
	let field = form.collection_field("notifications").expect("field");
	for spec in field.schema().shape.fields() {
		assert_eq!(field.errors().error_for(1, &spec.field_name), None);
	}
}

/// Must keep each error state no longer than its rows.
///
/// - Enforced in: `FormModel::dispatch`
/// - Failure symptom: Errors of a removed trailing row resurface on the next appended row.
#[cfg_attr(test, test)]
pub(crate) fn test_error_state_never_longer_than_rows() {
	let mut form = crate::FormModel::create(users_form());
	for _ in 0..3 {
		form.dispatch("notifications", CollectionEvent::AddRow, None).expect("known collection");
	}
	form.validate();
	assert_eq!(form.collection_errors("notifications").map(ErrorState::len), Some(3));

	form.dispatch("notifications", CollectionEvent::RemoveRow(2), None).expect("known collection");
	form.dispatch("notifications", CollectionEvent::RemoveRow(0), None).expect("known collection");
	let rows = form.collection("notifications").map(CollectionState::len).unwrap_or_default();
	let errors = form.collection_errors("notifications").map(ErrorState::len).unwrap_or_default();
	assert_eq!(rows, 1);
	assert!(errors <= rows);

	form.dispatch("notifications", CollectionEvent::AddRow, None).expect("known collection");
	assert_eq!(form.collection_field("notifications").expect("field").errors().error_for(1, "message"), None);
}

/// Must reject rows and values that do not fit the declared shape.
///
/// - Enforced in: `CollectionState::apply`
/// - Failure symptom: Rows gain stray keys or ill-typed values that the request body then carries.
#[cfg_attr(test, test)]
pub(crate) fn test_rows_keep_declared_shape() {
	let schema = notifications();
	let mut state = CollectionState::new();

	let stray = schema.initial_row().clone().with("id", "n-1");
	assert!(!state.append(&schema.shape, stray).is_applied());
	assert!(!state.append(&schema.shape, Row::new().with("message", "hi")).is_applied());
	assert!(state.is_empty());

	state.append(&schema.shape, schema.initial_row().clone());
	assert!(!state.update_field(&schema.shape, 0, "read", "yes").is_applied());
	assert!(!state.update_field(&schema.shape, 0, "priority", 1.0).is_applied());
	assert_eq!(state.get(0), Some(schema.initial_row()));
	assert_eq!(state.get(0).and_then(|r| r.get("created_at")), Some(&FieldValue::Date(d0())));

	let number = FieldChange::Number(f64::NAN).into_value();
	assert_eq!(number, FieldValue::Number(0.0));
}
