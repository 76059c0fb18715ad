//! HTTP API server for kql-assist.
//!
//! Hosts the Application Insights query proxy (`POST /query`) and, when an
//! LLM and credentials are configured, the chat endpoint driving the
//! confirm-then-run conversation.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod api_types;
mod handlers;


use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use kql_assist_backend::AppInsightsClient;
use kql_assist_service::ConversationService;

pub use api_types::{ChatResponse, ReadinessResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Client the proxy route forwards queries through.
    pub appinsights: Arc<AppInsightsClient>,
    /// Conversation service; `None` disables the chat routes.
    pub conversation: Option<Arc<ConversationService>>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/readiness", get(readiness))
        .route("/api/version", get(version))
        .route("/query", post(handlers::query::run_query))
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/api/sessions/{user_id}",
            get(handlers::chat::get_session).delete(handlers::chat::reset_session),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    let pending_sessions = match &state.conversation {
        Some(conversation) => conversation.pending_count().await,
        None => 0,
    };
    Json(ReadinessResponse {
        status: "ready",
        chat_enabled: state.conversation.is_some(),
        pending_sessions,
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
