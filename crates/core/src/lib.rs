//! Core types for kql-assist
//!
//! Shared by the LLM, backend, service and HTTP crates: the KQL extractor,
//! agent output model, per-user session state and the proxy wire types.

pub mod constants;
mod agent_output;
mod env_config;
mod extract;
mod query;
mod reply;
mod session;

pub use agent_output::{AgentOutput, AssistantMessage};
pub use env_config::{env_flag, env_parse_with_default, env_string_with_default};
pub use extract::{extract_kql, extract_kql_text};
pub use query::{Credentials, QueryRequest};
pub use reply::{CONFIRM_PROMPT, ChatReply, REJECTED_PROMPT};
pub use session::{PendingQuery, SessionState};
