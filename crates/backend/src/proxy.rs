use async_trait::async_trait;
use kql_assist_core::{Credentials, QueryRequest};
use serde_json::Value;

use crate::error::BackendError;
use crate::executor::QueryExecutor;
use crate::{build_http_client, read_json};

/// Client for a running query proxy (`POST /query`).
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a query through the proxy.
    ///
    /// # Errors
    /// On a non-200 answer, `BackendError::Status` carries the proxy's status
    /// and the `detail` it reported (the backend's raw body).
    pub async fn query(&self, request: &QueryRequest) -> Result<Value, BackendError> {
        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { code: status.as_u16(), body: error_detail(body) });
        }

        read_json(response, "query proxy response").await
    }
}

#[async_trait]
impl QueryExecutor for ProxyClient {
    async fn execute(&self, kql: &str, credentials: &Credentials) -> Result<Value, BackendError> {
        self.query(&QueryRequest::new(kql, credentials)).await
    }
}

/// Pulls `detail` out of a `{"detail": ...}` error body, keeping the body
/// as-is when it has another shape.
fn error_detail(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(mut map)) => match map.remove("detail") {
            Some(Value::String(detail)) => detail,
            Some(other) => other.to_string(),
            None => body,
        },
        _ => body,
    }
}
