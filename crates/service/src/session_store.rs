use std::collections::HashMap;

use async_trait::async_trait;
use kql_assist_core::SessionState;
use tokio::sync::RwLock;

/// Per-user conversation state storage.
///
/// Implementations own the records; callers always get clones. A user with
/// no record is `Idle`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current state for `user_id`, `Idle` if none is stored.
    async fn get(&self, user_id: &str) -> SessionState;

    /// Replace the state for `user_id`. Storing `Idle` drops the record.
    async fn put(&self, user_id: &str, state: SessionState);

    /// Drop the record for `user_id`. Returns `true` if a query was pending.
    async fn remove(&self, user_id: &str) -> bool;

    /// Number of users with a pending query.
    async fn pending_count(&self) -> usize;
}

/// Process-memory store, lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    states: RwLock<HashMap<String, SessionState>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &str) -> SessionState {
        self.states.read().await.get(user_id).cloned().unwrap_or_default()
    }

    async fn put(&self, user_id: &str, state: SessionState) {
        let mut states = self.states.write().await;
        match state {
            SessionState::Idle => {
                states.remove(user_id);
            },
            pending @ SessionState::AwaitingConfirmation(_) => {
                states.insert(user_id.to_owned(), pending);
            },
        }
    }

    async fn remove(&self, user_id: &str) -> bool {
        self.states.write().await.remove(user_id).is_some()
    }

    async fn pending_count(&self) -> usize {
        self.states.read().await.len()
    }
}
