//! Admin error types

use numbook_client::ApiError;

/// Result alias for admin operations
pub type Result<T> = std::result::Result<T, AdminError>;

/// Failures surfaced by admin operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
	/// Rejected on the client before any request was sent
	#[error("Validation error: {0}")]
	Validation(String),

	/// Backend call failed
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Copying to the clipboard failed
	#[error("Clipboard error: {0}")]
	Clipboard(String),
}

impl AdminError {
	/// Message to show the user: the server detail when there is one,
	/// otherwise `fallback`.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			Self::Validation(message) | Self::Clipboard(message) => message.clone(),
			Self::Api(err) => err.detail().unwrap_or(fallback).to_string(),
		}
	}
}
