use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use kql_assist_service::ConversationService;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{ChatRequest, ChatResponse, ResetResponse, SessionResponse};

fn conversation(state: &AppState) -> Result<&Arc<ConversationService>, ApiError> {
    state.conversation.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable(
            "chat not configured (LLM API key or Application Insights credentials missing)"
                .to_owned(),
        )
    })
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let conversation = conversation(&state)?;
    let (result, session) =
        conversation.handle_message_with_session(&req.user_id, &req.message).await?;
    Ok(Json(ChatResponse { reply: result.to_string(), result, session }))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = conversation(&state)?.session(&user_id).await;
    Ok(Json(SessionResponse { user_id, session }))
}

pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ResetResponse>, ApiError> {
    let cleared = conversation(&state)?.reset(&user_id).await;
    tracing::info!(user_id = %user_id, cleared, "session reset");
    Ok(Json(ResetResponse { user_id, cleared }))
}
