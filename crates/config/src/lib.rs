//! Configuration for the platter admin forms.
//!
//! Configuration is written in TOML and every key is optional:
//!
//! ```toml
//! [resolver]
//! debounce_ms = 300    # quiet period before a search term is fetched
//! page_size = 20       # candidates per fetch
//! min_term_len = 0     # shorter terms request the default page
//!
//! [forms]
//! date_format = "%d/%m/%Y"
//! validation = "on_change"    # or "on_submit"
//! ```
//!
//! # Configuration Files
//!
//! [`PlatterConfig::discover`] looks in `$PLATTER_CONFIG_DIR/config.toml`, then
//! `$XDG_CONFIG_HOME/platter/config.toml` (or the platform equivalent). A missing
//! file yields the defaults; an unreadable or invalid one is an error.

pub mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::{ConfigError, Result};
use platter_form::ValidationMode;
use platter_resolver::ResolverConfig;
use platter_schema::{DEFAULT_DATE_FORMAT, DateConfig};
use serde::Deserialize;
use tracing::debug;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PLATTER_CONFIG_DIR";

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatterConfig {
	/// Referenced-entity search tuning.
	pub resolver: ResolverConfig,
	/// Form presentation and validation.
	pub forms: FormsConfig,
}

/// `[forms]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
	/// chrono format string used by date pickers.
	pub date_format: Arc<str>,
	pub validation: ValidationMode,
}

impl Default for FormsConfig {
	fn default() -> Self {
		Self {
			date_format: Arc::from(DEFAULT_DATE_FORMAT),
			validation: ValidationMode::default(),
		}
	}
}

impl PlatterConfig {
	/// Parses a TOML string. `path` is only used in error messages.
	pub fn parse(input: &str, path: &Path) -> Result<Self> {
		let config: Self = toml::from_str(input).map_err(|error| ConfigError::Toml {
			path: path.to_path_buf(),
			error,
		})?;
		config.check()?;
		Ok(config)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content, path)
	}

	/// Loads the default config file when it exists, otherwise the defaults.
	pub fn discover() -> Result<Self> {
		match config_dir().map(|dir| dir.join("config.toml")) {
			Some(path) if path.exists() => {
				debug!(path = %path.display(), "config.load");
				Self::load(path)
			}
			_ => Ok(Self::default()),
		}
	}

	fn check(&self) -> Result<()> {
		if !DateConfig::is_valid_format(&self.forms.date_format) {
			return Err(ConfigError::InvalidDateFormat(self.forms.date_format.to_string()));
		}
		Ok(())
	}
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Option<PathBuf> {
	if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
		return Some(PathBuf::from(dir));
	}
	dirs::config_dir().map(|d| d.join("platter"))
}
