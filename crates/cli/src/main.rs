//! Platter command-line front end.
//!
//! Renders the restaurant admin forms as text and checks records against them,
//! resolving foreign keys against a JSON entity directory.

mod cli;
mod render;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use platter_config::PlatterConfig;
use platter_domain::{DomainOptions, FORM_NAMES, StaticDirectory};
use platter_form::{FormError, FormModel};
use platter_resolver::Resolver;
use platter_schema::FormSchema;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => PlatterConfig::load(path)?,
		None => PlatterConfig::discover()?,
	};
	debug!(?config, "config.loaded");

	let today = chrono::Local::now().date_naive();
	let options = DomainOptions::new(today).with_date_format(Arc::clone(&config.forms.date_format));

	match cli.command {
		Command::Forms => {
			print!("{}", list_forms(&options)?);
			Ok(ExitCode::SUCCESS)
		}
		Command::Render {
			form,
			entity,
			directory,
		} => {
			let schema = build_form(&form, &options)?;
			let model = open_form(schema, entity.as_deref(), &config)?;
			let mut resolver = Resolver::new(config.resolver.clone());
			if let Some(path) = directory {
				let directories = StaticDirectory::load(&read_json(&path)?)
					.with_context(|| format!("invalid directory {}", path.display()))?;
				StaticDirectory::register_all(&mut resolver, directories);
			}
			load_references(&model, &resolver).await;
			print!("{}", render::render_form(&model, Some(&resolver)));
			Ok(ExitCode::SUCCESS)
		}
		Command::Check { form, entity } => {
			let schema = build_form(&form, &options)?;
			let mut model = open_form(schema, Some(&entity), &config)?;
			match model.begin_submit() {
				Ok(body) => {
					println!("{}", serde_json::to_string_pretty(&body)?);
					Ok(ExitCode::SUCCESS)
				}
				Err(FormError::Invalid { messages }) => {
					info!(form = %form, messages, "check.invalid");
					print!("{}", render::render_form(&model, None));
					eprintln!("{messages} validation error(s)");
					Ok(ExitCode::FAILURE)
				}
				Err(err) => Err(err.into()),
			}
		}
	}
}

fn list_forms(options: &DomainOptions) -> anyhow::Result<String> {
	let mut out = String::new();
	for name in FORM_NAMES {
		let schema = build_form(name, options)?;
		out.push_str(&format!("{} ({} scalar fields)\n", schema.name, schema.scalars.len()));
		for collection in &schema.collections {
			out.push_str(&format!("  {} ({} fields)\n", collection.name, collection.shape.len()));
		}
	}
	Ok(out)
}

fn build_form(name: &str, options: &DomainOptions) -> anyhow::Result<Arc<FormSchema>> {
	let Some(schema) = platter_domain::form(name, options) else {
		bail!("unknown form `{name}` (expected one of: {})", FORM_NAMES.join(", "));
	};
	Ok(Arc::new(schema?))
}

fn open_form(schema: Arc<FormSchema>, entity: Option<&Path>, config: &PlatterConfig) -> anyhow::Result<FormModel> {
	let model = match entity {
		Some(path) => FormModel::edit(schema, &read_json(path)?)
			.with_context(|| format!("record {} does not fit the form", path.display()))?,
		None => FormModel::create(schema),
	};
	Ok(model.with_mode(config.forms.validation))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
	let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Loads the default candidate page for every foreign-key cell on screen.
async fn load_references(model: &FormModel, resolver: &Resolver) {
	for name in model.schema().collection_names() {
		let Some(field) = model.collection_field(name) else {
			continue;
		};
		for (key, relation) in field.with_resolver(resolver).reference_slots() {
			let slot = match resolver.slot(&key, &relation) {
				Ok(slot) => slot,
				Err(err) => {
					warn!(collection = %key.collection, index = key.index, %err, "reference.unavailable");
					continue;
				}
			};
			if let Err(err) = slot.ensure_loaded().await
				&& !err.is_stale()
			{
				warn!(collection = %key.collection, index = key.index, field = %key.field, %err, "reference.load_failed");
			}
		}
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("PLATTER_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("platter=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
