//! # numbook settings
//!
//! Layered configuration for the numbook admin client.
//!
//! Settings are assembled from sources merged in priority order
//! (environment variables > TOML file > defaults) and validated before use.
//!
//! ## Quick Start
//!
//! ```rust
//! use numbook_conf::Settings;
//!
//! let settings = Settings::builder()
//!     .toml_str("api_base_url = \"https://numbers.example.com\"")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.api_base_url, "https://numbers.example.com");
//! assert_eq!(settings.default_page_size, 20);
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: the `Settings` struct and its builder
//! - [`sources`]: defaults, TOML and environment sources
//! - [`validation`]: checks run after merging

pub mod settings;
pub mod sources;
pub mod validation;

pub use settings::{Settings, SettingsBuilder, SettingsError};
pub use sources::{ConfigSource, EnvSource, SourceError, TomlSource};
pub use validation::ValidationError;
