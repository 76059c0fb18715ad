//! Typed error enum for the backend crate.

use thiserror::Error;

/// Errors from the telemetry backend or the query proxy.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-success status, with the body exactly as the server sent it.
    #[error("backend returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("invalid response in {context}: {source}")]
    InvalidResponse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl BackendError {
    /// Text shown to a chat user for this failure.
    ///
    /// Status errors surface the body verbatim; everything else uses the
    /// error message.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status reported by the remote side, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
