use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "platter")]
#[command(about = "Render and check restaurant admin forms")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to $PLATTER_CONFIG_DIR/config.toml or the user config dir)
	#[arg(long, short = 'c', global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List every form and its collections
	Forms,
	/// Render a form as text
	Render {
		/// Form name (users, restaurants)
		form: String,
		/// Existing record to edit, as JSON
		#[arg(long, value_name = "FILE")]
		entity: Option<PathBuf>,
		/// Referenced entities keyed by relation, as JSON
		#[arg(long, value_name = "FILE")]
		directory: Option<PathBuf>,
	},
	/// Validate a record and print its request body
	Check {
		/// Form name (users, restaurants)
		form: String,
		/// Record to validate, as JSON
		#[arg(long, value_name = "FILE")]
		entity: PathBuf,
	},
}
