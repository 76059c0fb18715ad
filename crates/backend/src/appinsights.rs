use async_trait::async_trait;
use kql_assist_core::constants::API_KEY_HEADER;
use kql_assist_core::{Credentials, QueryRequest};
use reqwest::Url;
use serde_json::Value;

use crate::error::BackendError;
use crate::executor::QueryExecutor;
use crate::{build_http_client, read_json};

/// Client for the Application Insights REST query API.
///
/// Forwards KQL as-is: no validation, retry or caching.
#[derive(Debug, Clone)]
pub struct AppInsightsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl AppInsightsClient {
    /// # Errors
    /// Returns an error if `base_url` is not a valid base URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client: build_http_client()?, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base}/v1/apps/{app_id}/query`, with `app_id` escaped as a single path segment.
    fn query_url(&self, app_id: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", "apps", app_id, "query"]);
        Ok(url)
    }

    /// Runs a query and returns the backend's JSON body untouched.
    ///
    /// # Errors
    /// `BackendError::Status` carries the backend's status code and raw body
    /// for any non-200 answer.
    pub async fn query(&self, request: &QueryRequest) -> Result<Value, BackendError> {
        let url = self.query_url(&request.app_id)?;
        tracing::debug!(app_id = %request.app_id, kql = %request.kql_query, "forwarding query to Application Insights");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &request.api_key)
            .query(&[("query", request.kql_query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(app_id = %request.app_id, status = status.as_u16(), "Application Insights query failed");
            return Err(BackendError::Status { code: status.as_u16(), body });
        }

        read_json(response, "Application Insights query response").await
    }
}

#[async_trait]
impl QueryExecutor for AppInsightsClient {
    async fn execute(&self, kql: &str, credentials: &Credentials) -> Result<Value, BackendError> {
        self.query(&QueryRequest::new(kql, credentials)).await
    }
}
