//! Error taxonomy for backend calls.

use std::fmt;

use serde_json::Value;

/// Categories of failure for calls against the AtlasList backend.
///
/// `AuthorizationExpired` is special: it is the only condition that
/// means "the stored session is no longer valid" and must reach the
/// session lifecycle layer so the store is cleared and the user is
/// sent back to login. Everything else stays local to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No credential is present locally; no network call was made.
    Unauthenticated,
    /// The backend answered 401: the credential is no longer valid.
    AuthorizationExpired,
    /// Non-success status other than 401, with the server's message
    /// when it provided one.
    RequestRejected { status: u16, message: String },
    /// Transport-level failure (connect, timeout, malformed body).
    Network(String),
}

impl ApiError {
    /// Builds a `RequestRejected` from a status and raw response body,
    /// extracting a `{message}` field when the body is JSON.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed (HTTP {status})"));
        ApiError::RequestRejected { status, message }
    }

    /// Returns true if this error proves the session is invalid
    /// server-side and the store must be cleared.
    pub fn is_authorization_expired(&self) -> bool {
        matches!(self, ApiError::AuthorizationExpired)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated => {
                write!(f, "No access token found. Please log in.")
            }
            ApiError::AuthorizationExpired => {
                write!(f, "Unauthorized. Please log in.")
            }
            ApiError::RequestRejected { message, .. } => write!(f, "{message}"),
            ApiError::Network(message) => write!(f, "Network error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result type for backend operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
