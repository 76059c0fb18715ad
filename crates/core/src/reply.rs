use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Prompt shown under every generated query.
pub const CONFIRM_PROMPT: &str = "Do you want to run this query? (yes/no)";

/// Prompt shown after the user declines a query.
pub const REJECTED_PROMPT: &str =
    "Query discarded. Please provide a new or modified question.";

/// What the conversation sends back to the user after a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatReply {
    /// A generated query awaiting confirmation.
    Candidate { kql: String },
    /// Raw backend response for a confirmed query.
    Results { payload: Value },
    /// Failure detail from the backend or the agent.
    Error { detail: String },
    /// The user declined the pending query.
    Rejected,
}

impl fmt::Display for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidate { kql } => write!(f, "```kql\n{kql}\n```\n{CONFIRM_PROMPT}"),
            Self::Results { payload } => {
                let pretty = serde_json::to_string_pretty(payload).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            },
            Self::Error { detail } => write!(f, "Error: {detail}"),
            Self::Rejected => f.write_str(REJECTED_PROMPT),
        }
    }
}
