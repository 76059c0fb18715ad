//! Typed API error for HTTP handlers.
//!
//! Every error body has the shape `{"detail": "message"}` so proxy clients
//! see the same format whether the failure came from us or the backend.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kql_assist_backend::BackendError;
use kql_assist_service::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller.
    BadRequest(String),
    /// Backend answered with a non-success status; relayed as-is.
    Upstream { status: StatusCode, detail: String },
    /// 502 Bad Gateway — backend or LLM unreachable or answered garbage.
    BadGateway(String),
    /// 503 Service Unavailable — required backend not configured.
    ServiceUnavailable(String),
    /// 500 Internal Server Error — unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Upstream { status, detail } => (status, detail),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"detail": detail});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { code, body } => match StatusCode::from_u16(code) {
                Ok(status) => Self::Upstream { status, detail: body },
                Err(_) => Self::BadGateway(body),
            },
            BackendError::ClientInit(_) | BackendError::InvalidUrl(_) => {
                Self::Internal(anyhow::Error::new(err))
            },
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Llm(e) => Self::BadGateway(format!("query generation failed: {e}")),
        }
    }
}
