//! Configuration sources for layered settings
//!
//! Each source yields a flat map of setting keys to JSON values. The
//! builder merges maps in priority order, higher priority winning.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<Map<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Variable lookup used by [`EnvSource`].
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable configuration source
///
/// For every known key, reads `{prefix}{KEY}` (upper-cased). Values that
/// parse as unsigned integers become numbers, everything else stays a string.
pub struct EnvSource {
	prefix: String,
	keys: Vec<&'static str>,
	lookup: EnvLookup,
}

impl EnvSource {
	/// Create a source reading the process environment
	pub fn new(prefix: impl Into<String>, keys: &[&'static str]) -> Self {
		Self {
			prefix: prefix.into(),
			keys: keys.to_vec(),
			lookup: Arc::new(|name| std::env::var(name).ok()),
		}
	}

	/// Replace the variable lookup, e.g. with a fixed map in tests
	pub fn with_lookup<F>(mut self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		self.lookup = Arc::new(lookup);
		self
	}

	fn variable_name(&self, key: &str) -> String {
		format!("{}{}", self.prefix, key.to_uppercase())
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		let mut config = Map::new();
		for key in &self.keys {
			let Some(raw) = (self.lookup)(&self.variable_name(key)) else {
				continue;
			};
			let trimmed = raw.trim();
			let value = match trimmed.parse::<u64>() {
				Ok(n) => Value::from(n),
				Err(_) => Value::String(trimmed.to_string()),
			};
			config.insert((*key).to_string(), value);
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("environment variables ({}*)", self.prefix)
	}
}

enum TomlInput {
	File(PathBuf),
	Inline(String),
}

/// TOML configuration source, from a file or an inline string
pub struct TomlSource {
	input: TomlInput,
	optional: bool,
}

impl TomlSource {
	/// Create a source reading a TOML file. Missing files are an error.
	pub fn file(path: impl AsRef<Path>) -> Self {
		Self {
			input: TomlInput::File(path.as_ref().to_path_buf()),
			optional: false,
		}
	}

	/// Create a source parsing an inline TOML document
	pub fn inline(content: impl Into<String>) -> Self {
		Self {
			input: TomlInput::Inline(content.into()),
			optional: false,
		}
	}

	/// Treat a missing file as an empty source
	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}
}

impl ConfigSource for TomlSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		let content = match &self.input {
			TomlInput::Inline(content) => content.clone(),
			TomlInput::File(path) => match fs::read_to_string(path) {
				Ok(content) => content,
				Err(e) if self.optional && e.kind() == std::io::ErrorKind::NotFound => {
					tracing::debug!(path = %path.display(), "optional settings file not found");
					return Ok(Map::new());
				}
				Err(source) => {
					return Err(SourceError::Io {
						path: path.clone(),
						source,
					});
				}
			},
		};

		let table: toml::Table = toml::from_str(&content)?;
		match serde_json::to_value(table)? {
			Value::Object(map) => Ok(map),
			_ => Ok(Map::new()),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		match &self.input {
			TomlInput::File(path) => format!("TOML file: {}", path.display()),
			TomlInput::Inline(_) => "inline TOML".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_env_source_parses_numbers_and_strings() {
		let source = EnvSource::new("NUMBOOK_", &["api_prefix", "default_page_size", "missing"])
			.with_lookup(|name| match name {
				"NUMBOOK_API_PREFIX" => Some("/api/v2".to_string()),
				"NUMBOOK_DEFAULT_PAGE_SIZE" => Some(" 50 ".to_string()),
				_ => None,
			});

		let map = source.load().unwrap();
		assert_eq!(map.len(), 2);
		assert_eq!(map["api_prefix"], Value::from("/api/v2"));
		assert_eq!(map["default_page_size"], Value::from(50u64));
	}

	#[rstest]
	fn test_inline_toml() {
		let map = TomlSource::inline("search_debounce_ms = 250").load().unwrap();
		assert_eq!(map["search_debounce_ms"], Value::from(250));
	}

	#[rstest]
	fn test_optional_missing_file_is_empty() {
		let source = TomlSource::file("/nonexistent/numbook.toml").optional();
		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_required_missing_file_is_error() {
		let source = TomlSource::file("/nonexistent/numbook.toml");
		assert!(matches!(source.load(), Err(SourceError::Io { .. })));
	}
}
