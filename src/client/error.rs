//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Message shown when the backend gives nothing better
pub const GENERIC_ERROR: &str = "Failed to get a response from the server";

/// Errors from backend calls. Nothing is retried; every failure is handed to
/// the caller for one-shot display.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-2xx response, carrying the server's message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Network or protocol failure
    #[error("Failed to get a response from the server ({0})")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }

    /// The server's message, or the generic fallback
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(_) => GENERIC_ERROR.to_string(),
            ClientError::Decode(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Error body shapes the backend uses: `{"error": ...}` or `{"message": ...}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract the server's message from an error body
pub(crate) fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
}

/// Build the failure for a non-2xx response
pub(crate) fn api_error(status: u16, body: &str, fallback: &str) -> ClientError {
    ClientError::Api {
        status,
        message: server_message(body).unwrap_or_else(|| fallback.to_string()),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
