use serde::{Deserialize, Serialize};

/// Body of `POST /query` on the query proxy.
#[derive(Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub kql_query: String,
    pub app_id: String,
    pub api_key: String,
}

impl QueryRequest {
    #[must_use]
    pub fn new(kql_query: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            kql_query: kql_query.into(),
            app_id: credentials.app_id.clone(),
            api_key: credentials.api_key.clone(),
        }
    }
}

impl std::fmt::Debug for QueryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRequest")
            .field("kql_query", &self.kql_query)
            .field("app_id", &self.app_id)
            .field("api_key", &"***")
            .finish()
    }
}

/// Application Insights application id and API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub api_key: String,
}

impl Credentials {
    #[must_use]
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { app_id: app_id.into(), api_key: api_key.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("api_key", &"***")
            .finish()
    }
}
