//! Query execution against Application Insights.
//!
//! [`AppInsightsClient`] talks to the telemetry backend directly and backs the
//! `POST /query` proxy route; [`ProxyClient`] talks to a running proxy. Both
//! implement [`QueryExecutor`], the seam the conversation service runs
//! confirmed queries through.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod appinsights;
mod error;
mod executor;
mod proxy;

use std::time::Duration;

use kql_assist_core::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use kql_assist_core::env_parse_with_default;
use serde_json::Value;

pub use appinsights::AppInsightsClient;
pub use error::BackendError;
pub use executor::QueryExecutor;
pub use proxy::ProxyClient;

fn build_http_client() -> Result<reqwest::Client, BackendError> {
    let timeout_secs =
        env_parse_with_default("KQL_ASSIST_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BackendError::ClientInit(e.to_string()))
}

async fn read_json(response: reqwest::Response, context: &str) -> Result<Value, BackendError> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|source| BackendError::InvalidResponse { context: context.to_owned(), source })
}
