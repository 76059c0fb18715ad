//! Shared constants for kql-assist.
//!
//! Defaults for every environment-driven setting live here so the CLI, the
//! HTTP server and tests agree on them.

/// Default Application Insights REST API base URL.
pub const DEFAULT_APPINSIGHTS_API_URL: &str = "https://api.applicationinsights.io";

/// Default OpenAI-compatible LLM base URL.
pub const DEFAULT_LLM_URL: &str = "https://api.openai.com";

/// Default LLM model used for KQL generation.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default address of the query proxy used by the chat REPL.
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8000";

/// Default outbound HTTP timeout in seconds (LLM and backend calls).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Header carrying the Application Insights API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Replies accepted as confirmation, compared after trim + lowercase.
pub const CONFIRM_WORDS: [&str; 2] = ["yes", "y"];
