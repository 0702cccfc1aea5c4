use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `(error, message)` pair reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error class, e.g. `BadRequestError`
    pub error: String,
    /// Human-readable description
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

/// Error returned for any non-2xx response.
///
/// The display form is `Status code <n>. <error>: <message>[, ...]`, so
/// callers matching on substrings such as `"No result found"` keep working,
/// while [`ApiError::errors`] exposes the structured pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    errors: Vec<ErrorDetail>,
    body: String,
}

impl ApiError {
    /// Builds an error from a response status and its raw body.
    ///
    /// Bodies that are not in the `{"errors": [...]}` shape are kept verbatim
    /// and used as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let errors = serde_json::from_str::<ErrorBody>(body)
            .map(|parsed| parsed.errors)
            .unwrap_or_default();

        Self {
            status,
            errors,
            body: body.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    /// Raw response body as received
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether any reported pair carries the given error class
    pub fn has_error_code(&self, code: &str) -> bool {
        self.errors.iter().any(|detail| detail.error == code)
    }

    /// Concatenated `error: message` pairs, or the raw body when none were parsed
    pub fn message(&self) -> String {
        if self.errors.is_empty() {
            let body = self.body.trim();
            if body.is_empty() {
                return "empty response body".to_string();
            }
            return body.to_string();
        }

        self.errors
            .iter()
            .map(|detail| format!("{}: {}", detail.error, detail.message))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status code {}. {}", self.status, self.message())
    }
}

impl std::error::Error for ApiError {}
