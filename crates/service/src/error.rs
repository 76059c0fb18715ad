//! Typed error enum for the service layer.

use kql_assist_llm::LlmError;
use thiserror::Error;

/// Failures that prevent a message from being handled.
///
/// Backend failures during execution are not errors here: they are part of
/// the conversation and come back as `ChatReply::Error`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Query generation failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input (empty user id or message).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
