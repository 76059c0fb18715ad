use kql_assist_core::{ChatReply, SessionState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Reply rendered as chat text.
    pub reply: String,
    /// Structured form of the same reply.
    pub result: ChatReply,
    /// State after the message was handled.
    pub session: SessionState,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub session: SessionState,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub user_id: String,
    pub cleared: bool,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub chat_enabled: bool,
    pub pending_sessions: usize,
}
