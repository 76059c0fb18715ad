//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from LLM API operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices or content returned")]
    EmptyResponse,
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<LlmError>),
}

impl LlmError {
    /// Whether this error is transient and should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 529),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        for code in [429, 500, 502, 503, 529] {
            let err = LlmError::HttpStatus { code, body: String::new() };
            assert!(err.is_transient(), "{code} should be transient");
        }
        for code in [400, 401, 403, 404, 422] {
            let err = LlmError::HttpStatus { code, body: String::new() };
            assert!(!err.is_transient(), "{code} should not be transient");
        }
    }

    #[test]
    fn test_terminal_variants() {
        assert!(!LlmError::EmptyResponse.is_transient());
        assert!(!LlmError::RetriesExhausted(Box::new(LlmError::EmptyResponse)).is_transient());
    }
}
