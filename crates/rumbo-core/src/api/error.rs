use thiserror::Error;

use super::client::Payload;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success HTTP status. The message is the body's `message` field
    /// when the body carried one, otherwise "Error {status}: {status text}".
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build the error for a non-success response, preferring the human
    /// message a JSON body carries over the bare status line.
    pub fn from_status(status: reqwest::StatusCode, payload: &Payload) -> Self {
        let message = match payload {
            Payload::Json(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(|m| m.to_string()),
            Payload::Text(_) => None,
        };
        let message = message.unwrap_or_else(|| {
            format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
        });
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Connect(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidResponse(e.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
