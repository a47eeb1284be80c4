//! Plain-text rendering of forms.

use std::fmt::Write;

use platter_form::{CollectionHeader, FieldCell, FieldInput, FieldRenderer, FormModel};
use platter_resolver::{Resolver, SlotSnapshot};
use platter_schema::{EntityId, FieldValue, ForeignKeyConfig, RowShape};

/// Renders each cell as `label: value`, rows as indented blocks.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl FieldRenderer for TextRenderer {
	type Cell = String;
	type Row = String;
	type Output = String;

	fn render_field(&mut self, cell: FieldCell<'_>) -> String {
		let value = match &cell.input {
			FieldInput::Text { value } => format!("{value:?}"),
			FieldInput::Number { value: None, .. } => "-".to_owned(),
			FieldInput::Number {
				value: Some(n),
				config,
			} if config.integer => format!("{n:.0}"),
			FieldInput::Number { value: Some(n), .. } => n.to_string(),
			FieldInput::Boolean { value } => String::from(if *value { "[x]" } else { "[ ]" }),
			FieldInput::Date { value: None, .. } => "-".to_owned(),
			FieldInput::Date {
				value: Some(date),
				config,
			} => config.format_date(*date),
			FieldInput::ForeignKey {
				value,
				config,
				candidates,
			} => reference(*value, config, candidates.as_ref()),
		};
		match cell.error {
			Some(error) => format!("{}: {value}  ! {error}", cell.label()),
			None => format!("{}: {value}", cell.label()),
		}
	}

	fn render_row(&mut self, index: usize, cells: Vec<String>) -> String {
		let mut out = format!("  #{index}\n");
		for cell in cells {
			let _ = writeln!(out, "    {cell}");
		}
		out
	}

	fn render_collection(&mut self, header: CollectionHeader<'_>, rows: Vec<String>) -> String {
		let marker = if header.has_errors { " (invalid)" } else { "" };
		let mut out = format!("{} [{}]{marker}\n", header.title, header.len);
		if rows.is_empty() {
			out.push_str("  (no rows)\n");
		}
		out.extend(rows);
		out
	}
}

fn reference(value: Option<&EntityId>, config: &ForeignKeyConfig, candidates: Option<&SlotSnapshot>) -> String {
	let mut out = match value {
		None => format!("<{}>", config.placeholder),
		Some(id) => candidates
			.and_then(|snapshot| snapshot.candidates.iter().find(|record| &record.id == id))
			.map_or_else(|| id.to_string(), |record| format!("{id} ({})", record.label(&config.display_fields))),
	};
	if let Some(snapshot) = candidates {
		if let Some(error) = &snapshot.error {
			let _ = write!(out, " [lookup failed: {error}]");
		} else if snapshot.loading {
			out.push_str(" [loading]");
		} else {
			let _ = write!(out, " [{} options]", snapshot.candidates.len());
		}
	}
	out
}

fn scalar(shape: &RowShape, field: &str, value: &FieldValue) -> String {
	let formatted = match value {
		FieldValue::Null => "-".to_owned(),
		FieldValue::Text(text) => format!("{text:?}"),
		FieldValue::Reference(id) => id.to_string(),
		other => other.to_json().to_string(),
	};
	let label = shape.field(field).map_or(field, |spec| &*spec.label);
	format!("{label}: {formatted}")
}

/// Renders the scalar fields followed by every collection.
pub fn render_form(form: &FormModel, resolver: Option<&Resolver>) -> String {
	let schema = form.schema();
	let mut out = format!("{}\n", schema.title);
	for (field, value) in form.values().scalars.iter() {
		let _ = write!(out, "  {}", scalar(&schema.scalars, field, value));
		match form.errors().scalars.get(field) {
			Some(error) => {
				let _ = writeln!(out, "  ! {error}");
			}
			None => out.push('\n'),
		}
	}
	for name in schema.collection_names() {
		let Some(field) = form.collection_field(name) else {
			continue;
		};
		let field = match resolver {
			Some(resolver) => field.with_resolver(resolver),
			None => field,
		};
		out.push('\n');
		out.push_str(&field.render(&mut TextRenderer));
	}
	if let Some(error) = &form.errors().submit {
		let _ = writeln!(out, "\nsubmit failed: {error}");
	}
	out
}
