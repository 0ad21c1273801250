//! API Errors
//!
//! Every failure at the HTTP client boundary collapses into [`ApiError`],
//! which always carries a message fit for display.

use thiserror::Error;

/// Message used when a failed response has no readable body
pub const GENERIC_ERROR: &str = "An error occurred";
/// Message used when a failed response body has neither `message` nor `error`
pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{0}")]
    Network(String),
    /// The server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A success body did not have the expected shape
    #[error("{0}")]
    Decode(String),
    /// The request body could not be serialized
    #[error("{0}")]
    Encode(String),
    /// Input refused before anything was sent
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// Build the error for a non-success response from its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => ["message", "error"]
                .iter()
                .find_map(|key| {
                    value
                        .get(key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| REQUEST_FAILED.to_string()),
            Err(_) => GENERIC_ERROR.to_string(),
        };
        ApiError::Status { status, message }
    }

    /// Human-readable text shown in banners and inline errors
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(msg)
            | ApiError::Decode(msg)
            | ApiError::Encode(msg)
            | ApiError::Invalid(msg) => msg,
            ApiError::Status { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
