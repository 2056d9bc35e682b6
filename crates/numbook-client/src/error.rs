//! API error types
//!
//! Every failure of a backend call is an [`ApiError`]. Non-2xx responses keep
//! the HTTP status and, when the body is a JSON object with a `detail` field,
//! the server-provided message.

use serde_json::Value;

/// Detail fragment the backend uses when a user exceeds their booking quota.
pub const BOOKING_LIMIT_DETAIL: &str = "booking limit exceeded";

/// Result alias for backend calls
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error returned by backend calls
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
	/// Connection failure, timeout or an aborted transfer
	#[error("Network error: {0}")]
	Network(String),

	/// Non-success HTTP status
	#[error("Server error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
	Status {
		/// HTTP status code
		status: u16,
		/// Server-provided `detail` message, if any
		detail: Option<String>,
	},

	/// Response body did not match the expected shape
	#[error("Deserialization error: {0}")]
	Decode(String),

	/// Endpoint URL could not be built
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),

	/// HTTP client could not be constructed
	#[error("Client error: {0}")]
	Client(String),
}

impl ApiError {
	/// Build a status error from a response body
	pub fn from_response(status: u16, body: &str) -> Self {
		Self::Status {
			status,
			detail: extract_detail(body),
		}
	}

	/// HTTP status, for status errors
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Server-provided detail message, for status errors
	pub fn detail(&self) -> Option<&str> {
		match self {
			Self::Status { detail, .. } => detail.as_deref(),
			_ => None,
		}
	}

	/// Whether the backend refused a booking because the quota is used up.
	///
	/// Recognised by HTTP 429 or by the booking-limit detail message.
	pub fn is_quota_exceeded(&self) -> bool {
		match self {
			Self::Status { status: 429, .. } => true,
			Self::Status {
				detail: Some(detail),
				..
			} => detail.to_lowercase().contains(BOOKING_LIMIT_DETAIL),
			_ => false,
		}
	}

	/// Whether the backend reported a conflict (HTTP 409)
	pub fn is_conflict(&self) -> bool {
		self.status() == Some(409)
	}
}

impl From<reqwest::Error> for ApiError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			Self::Decode(err.to_string())
		} else if err.is_builder() {
			Self::InvalidUrl(err.to_string())
		} else {
			Self::Network(err.to_string())
		}
	}
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

/// Pull the `detail` message out of an error body.
///
/// Accepts `{"detail": "..."}` and validation-style
/// `{"detail": [{"msg": "..."}, ...]}` (messages joined with `"; "`).
fn extract_detail(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;
	match value.get("detail")? {
		Value::String(detail) => Some(detail.clone()),
		Value::Array(items) => {
			let messages: Vec<&str> = items
				.iter()
				.filter_map(|item| item.get("msg").and_then(Value::as_str))
				.collect();
			(!messages.is_empty()).then(|| messages.join("; "))
		}
		_ => None,
	}
}
