use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated query waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuery {
    pub kql_text: String,
    pub created_at: DateTime<Utc>,
}

impl PendingQuery {
    #[must_use]
    pub fn new(kql_text: String) -> Self {
        Self { kql_text, created_at: Utc::now() }
    }
}

/// Per-user conversation state. A user with no stored state is `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingConfirmation(PendingQuery),
}

impl SessionState {
    #[must_use]
    pub const fn is_awaiting_confirmation(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation(_))
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingQuery> {
        match self {
            Self::AwaitingConfirmation(pending) => Some(pending),
            Self::Idle => None,
        }
    }
}
