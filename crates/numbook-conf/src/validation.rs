//! Settings validation
//!
//! Checks run once all sources have been merged, before the settings are
//! handed to the client.

use crate::settings::Settings;

/// Validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error
#[non_exhaustive]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Multiple validation errors: {0:?}")]
	Multiple(Vec<ValidationError>),
}

fn invalid(key: &str, message: &str) -> ValidationError {
	ValidationError::InvalidValue {
		key: key.to_string(),
		message: message.to_string(),
	}
}

/// Validate merged settings, collecting every problem found.
pub fn validate(settings: &Settings) -> ValidationResult {
	let mut errors = Vec::new();

	if !(settings.api_base_url.starts_with("http://")
		|| settings.api_base_url.starts_with("https://"))
	{
		errors.push(invalid("api_base_url", "must start with http:// or https://"));
	}
	if !settings.api_prefix.is_empty() && !settings.api_prefix.starts_with('/') {
		errors.push(invalid("api_prefix", "must be empty or start with '/'"));
	}
	if settings.request_timeout_secs == 0 {
		errors.push(invalid("request_timeout_secs", "must be greater than zero"));
	}
	if settings.default_page_size == 0 {
		errors.push(invalid("default_page_size", "must be greater than zero"));
	}
	if settings.report_page_size == 0 {
		errors.push(invalid("report_page_size", "must be greater than zero"));
	}

	match errors.len() {
		0 => Ok(()),
		1 => Err(errors.remove(0)),
		_ => Err(ValidationError::Multiple(errors)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_are_valid() {
		assert_eq!(validate(&Settings::default()), Ok(()));
	}

	#[rstest]
	fn test_single_error_is_not_wrapped() {
		let settings = Settings {
			api_prefix: "api".to_string(),
			..Settings::default()
		};
		assert_eq!(
			validate(&settings),
			Err(invalid("api_prefix", "must be empty or start with '/'"))
		);
	}

	#[rstest]
	fn test_multiple_errors_are_collected() {
		let settings = Settings {
			api_base_url: "ftp://numbers".to_string(),
			default_page_size: 0,
			..Settings::default()
		};
		match validate(&settings) {
			Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
			other => panic!("expected multiple errors, got {other:?}"),
		}
	}
}
