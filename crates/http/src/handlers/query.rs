use axum::{Json, extract::State};
use kql_assist_core::QueryRequest;
use serde_json::Value;
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;

/// `POST /query`: forward a KQL string to Application Insights.
///
/// Pure forwarding. The backend's JSON comes back untouched on success; on
/// failure its status code and raw body are relayed.
pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(app_id = %req.app_id, "proxying KQL query");
    let result = state.appinsights.query(&req).await.map_err(|e| {
        tracing::warn!(app_id = %req.app_id, error = %e, "proxied query failed");
        e
    })?;
    Ok(Json(result))
}
