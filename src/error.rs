//! Unified client error model.
//! Every typed resource client, the session store and the validation helpers report
//! failures through `ClientError`. An expired session (HTTP 401) has no variant:
//! it is handled inside the HTTP layer and reaches callers as `Ok(None)`.

use thiserror::Error;

/// Message used when a failed response carries no `error` field.
pub const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response other than 401.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON, or did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected client-side before any request was issued.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl ClientError {
    pub fn api<S: Into<String>>(status: u16, msg: S) -> Self { ClientError::Api { status, message: msg.into() } }
    pub fn validation<S: Into<String>>(field: S, msg: S) -> Self { ClientError::Validation { field: field.into(), message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { ClientError::Config { message: msg.into() } }

    /// Build an application error from a parsed failure body: the server's `error`
    /// field when present, otherwise the fixed fallback.
    pub fn from_body(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_MESSAGE);
        ClientError::api(status, message)
    }

    /// HTTP status for application errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool { matches!(self, ClientError::Validation { .. }) }
}

pub type Result<T> = std::result::Result<T, ClientError>;
