//! Error types for the SDK.

use thiserror::Error;

/// Errors returned by the HighLevel client.
///
/// Nothing here is retried internally except the single refresh-and-retry on
/// a 401 described on [`crate::HighLevelClient`]; every failure surfaces to
/// the caller.
#[derive(Debug, Error)]
pub enum HighLevelError {
    /// A credential or field required for the requested operation is missing.
    #[error("Missing configuration: {0}")]
    Config(String),

    /// No usable access token is available.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure: connect, timeout, or body read.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a body that could not be interpreted.
    #[error("Invalid response: {0}")]
    Protocol(String),

    /// Non-2xx API response, raw body attached for diagnostics.
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 401 triggered an automatic token refresh and the refresh itself
    /// failed. Carries both the original rejection and the refresh failure.
    #[error("API error (status {status}): {body}; token refresh failed: {source}")]
    RefreshFailed {
        /// Status of the rejected request (401).
        status: u16,
        /// Raw body of the rejected response.
        body: String,
        /// Why the refresh failed.
        #[source]
        source: Box<HighLevelError>,
    },
}

impl HighLevelError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create an API error.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a composite rejected-and-refresh-failed error.
    pub fn refresh_failed(status: u16, body: impl Into<String>, source: HighLevelError) -> Self {
        Self::RefreshFailed {
            status,
            body: body.into(),
            source: Box::new(source),
        }
    }

    /// The HTTP status of the failing response, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::RefreshFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HighLevelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HighLevelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, HighLevelError>;
