use crate::error::ApiError;
use thiserror::Error;

/// Crate-wide error type for every client operation.
///
/// Any non-2xx response from the service becomes [`NotifyError::Client`];
/// the remaining variants cover failures that happen before a response is
/// available (bad credentials, transport errors) or after it (bodies that do
/// not match the documented shape).
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The service rejected the request with a non-success status
    #[error(transparent)]
    Client(#[from] ApiError),

    /// The API key could not be parsed; raised before any network call
    #[error("Invalid API key: {reason}")]
    InvalidApiKey { reason: String },

    /// Signing the per-request bearer token failed
    #[error("Failed to sign request token")]
    Token {
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    /// Transport-level failure (connection refused, timeout, TLS, ...)
    #[error("HTTP request failed during {operation}")]
    Http {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// A successful response whose body did not match the expected shape
    #[error("Invalid response body for {operation}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// An id that would change the request path (empty, `.` or `..`)
    #[error("Invalid id '{id}': it cannot be used as a path segment")]
    InvalidId { id: String },

    /// Invalid client options such as a malformed base URL
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl NotifyError {
    pub fn invalid_api_key(reason: impl Into<String>) -> Self {
        Self::InvalidApiKey {
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    /// Returns the service error when this is a [`NotifyError::Client`]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Client(api_error) => Some(api_error),
            _ => None,
        }
    }

    /// HTTP status returned by the service, if a response was received
    pub fn status(&self) -> Option<u16> {
        self.as_api_error().map(ApiError::status)
    }
}

/// Type alias for Result with NotifyError to simplify function signatures
pub type NotifyResult<T> = Result<T, NotifyError>;
