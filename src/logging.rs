//! Tracing subscriber setup for binaries embedding the dashboard
//!
//! The filter is read from `NUMBOOK_LOG`, then `RUST_LOG`, and defaults to
//! `info` when neither is set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the preferred filter directives
pub const LOG_ENV: &str = "NUMBOOK_LOG";

const DEFAULT_FILTER: &str = "info";

/// Errors raised while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("invalid log filter `{directives}`: {source}")]
	Filter {
		directives: String,
		#[source]
		source: tracing_subscriber::filter::ParseError,
	},
	#[error("global subscriber already installed: {0}")]
	AlreadySet(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter from the environment
pub fn env_filter() -> Result<EnvFilter, LoggingError> {
	let directives = std::env::var(LOG_ENV)
		.or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
		.ok()
		.filter(|value| !value.trim().is_empty())
		.unwrap_or_else(|| DEFAULT_FILTER.to_string());
	filter_from(&directives)
}

fn filter_from(directives: &str) -> Result<EnvFilter, LoggingError> {
	EnvFilter::try_new(directives).map_err(|source| LoggingError::Filter {
		directives: directives.to_string(),
		source,
	})
}

/// Install a global `fmt` subscriber filtered by [`env_filter`]
pub fn try_init() -> Result<(), LoggingError> {
	let filter = env_filter()?;
	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_target(true))
		.try_init()?;
	tracing::debug!(env = LOG_ENV, "logging initialized");
	Ok(())
}

/// Like [`try_init`], ignoring a subscriber installed earlier
pub fn init() -> Result<(), LoggingError> {
	match try_init() {
		Err(LoggingError::AlreadySet(_)) => Ok(()),
		other => other,
	}
}
