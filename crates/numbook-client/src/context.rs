//! Caller identity

/// The signed-in user on whose behalf requests are made.
///
/// Supplied by the embedding application at construction. The client only
/// forwards the token; it never obtains or refreshes one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
	pub username: String,
	pub access_token: Option<String>,
}

impl UserContext {
	/// A user without a token; requests are sent unauthenticated
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// A user with a bearer token
	pub fn with_token(username: impl Into<String>, token: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			access_token: Some(token.into()),
		}
	}
}
