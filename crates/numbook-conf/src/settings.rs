//! Core settings for the numbook client

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sources::{ConfigSource, EnvSource, SourceError, TomlSource};
use crate::validation::{self, ValidationError};

/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "NUMBOOK_";

/// Every key understood by [`Settings`].
pub const SETTING_KEYS: &[&str] = &[
	"api_base_url",
	"api_prefix",
	"request_timeout_secs",
	"default_page_size",
	"page_size_reset_offset",
	"search_debounce_ms",
	"report_page_size",
];

/// Errors raised while assembling settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error(transparent)]
	Validation(#[from] ValidationError),
}

/// Settings for the numbook admin client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Backend origin, e.g. `https://numbers.example.com`
	pub api_base_url: String,
	/// Path prefix of every endpoint
	pub api_prefix: String,
	/// Per-request timeout
	pub request_timeout_secs: u64,
	/// Page size used when the URL carries no `quantity`
	pub default_page_size: u32,
	/// Offset applied after the page size changes on the phone list
	pub page_size_reset_offset: u32,
	/// Idle time after the last keystroke before search text is committed
	pub search_debounce_ms: u64,
	/// Rows per page in report detail lists
	pub report_page_size: u32,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			api_base_url: "http://localhost:8000".to_string(),
			api_prefix: "/api/v1".to_string(),
			request_timeout_secs: 30,
			default_page_size: 20,
			page_size_reset_offset: 1,
			search_debounce_ms: 500,
			report_page_size: 5,
		}
	}
}

impl Settings {
	/// Start building settings from defaults
	pub fn builder() -> SettingsBuilder {
		SettingsBuilder::new()
	}

	/// Defaults overridden by `NUMBOOK_*` environment variables
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::builder().env().build()
	}

	/// Request timeout as a [`Duration`]
	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	/// Search debounce delay as a [`Duration`]
	pub fn search_debounce(&self) -> Duration {
		Duration::from_millis(self.search_debounce_ms)
	}

	/// Full API root: base URL joined with the prefix
	pub fn api_root(&self) -> String {
		format!(
			"{}{}",
			self.api_base_url.trim_end_matches('/'),
			self.api_prefix.trim_end_matches('/')
		)
	}
}

/// Layered settings builder
///
/// Sources are merged by priority; on equal priority the one added last wins.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create an empty builder (defaults only)
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a configuration source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Add a TOML file that may be absent
	pub fn toml_file(self, path: impl AsRef<Path>) -> Self {
		self.add_source(TomlSource::file(path).optional())
	}

	/// Add an inline TOML document
	pub fn toml_str(self, content: impl Into<String>) -> Self {
		self.add_source(TomlSource::inline(content))
	}

	/// Add `NUMBOOK_*` process environment overrides
	pub fn env(self) -> Self {
		self.add_source(EnvSource::new(ENV_PREFIX, SETTING_KEYS))
	}

	/// Add `NUMBOOK_*` overrides read through `lookup`
	pub fn env_with<F>(self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		self.add_source(EnvSource::new(ENV_PREFIX, SETTING_KEYS).with_lookup(lookup))
	}

	/// Merge every source over the defaults, then validate
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		self.sources.sort_by_key(|s| s.priority());

		let mut merged = match serde_json::to_value(Settings::default())? {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		for source in &self.sources {
			let layer = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(source = %source.description(), keys = layer.len(), "merging settings source");
			merged.extend(layer);
		}

		let settings: Settings = serde_json::from_value(Value::Object(merged))?;
		validation::validate(&settings)?;
		Ok(settings)
	}
}
