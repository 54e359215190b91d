use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MegaportError {
    #[error("Megaport API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error envelope returned by the Megaport API on non-success responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    data: Option<serde_json::Value>,
}

impl MegaportError {
    pub fn from_status_code(status: u16, message: String) -> Self {
        match status {
            401 | 403 => MegaportError::AuthenticationError(message),
            404 => MegaportError::NotFound(message),
            _ => MegaportError::ApiError { status, message },
        }
    }

    /// Build an error from a raw response body, preferring the API's own
    /// `message` (and `data` detail) over the raw text.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                message: Some(message),
                data: Some(serde_json::Value::String(detail)),
            }) => format!("{} {}", message, detail),
            Ok(ErrorEnvelope {
                message: Some(message),
                ..
            }) => message,
            _ => body.to_string(),
        };
        Self::from_status_code(status, message)
    }

    /// HTTP status the remote API answered with, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            MegaportError::ApiError { status, .. } => Some(*status),
            MegaportError::NotFound(_) => Some(404),
            MegaportError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
