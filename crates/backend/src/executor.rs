use async_trait::async_trait;
use kql_assist_core::Credentials;
use serde_json::Value;

use crate::error::BackendError;

/// Runs a confirmed KQL query and returns the backend's raw JSON response.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, kql: &str, credentials: &Credentials) -> Result<Value, BackendError>;
}
