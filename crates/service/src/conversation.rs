use std::sync::Arc;

use kql_assist_backend::QueryExecutor;
use kql_assist_core::constants::CONFIRM_WORDS;
use kql_assist_core::{ChatReply, Credentials, PendingQuery, SessionState, extract_kql};
use kql_assist_llm::QueryGenerator;

use crate::error::ServiceError;
use crate::session_store::SessionStore;
use crate::user_locks::UserLocks;

/// Behaviour switches for [`ConversationService`].
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Credentials sent with every confirmed query.
    pub credentials: Credentials,
    /// Treat a non-yes answer as a fresh question instead of discarding it.
    pub reprocess_rejected: bool,
}

impl ConversationConfig {
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials, reprocess_rejected: false }
    }

    #[must_use]
    pub fn with_reprocess_rejected(mut self, enabled: bool) -> Self {
        self.reprocess_rejected = enabled;
        self
    }
}

/// Confirm-then-run conversation around KQL generation.
///
/// Per user: `Idle` → question → `AwaitingConfirmation` → yes/no → `Idle`.
pub struct ConversationService {
    generator: Arc<dyn QueryGenerator>,
    executor: Arc<dyn QueryExecutor>,
    store: Arc<dyn SessionStore>,
    locks: UserLocks,
    config: ConversationConfig,
}

impl ConversationService {
    #[must_use]
    pub fn new(
        generator: Arc<dyn QueryGenerator>,
        executor: Arc<dyn QueryExecutor>,
        store: Arc<dyn SessionStore>,
        config: ConversationConfig,
    ) -> Self {
        Self { generator, executor, store, locks: UserLocks::default(), config }
    }

    /// Handles one user message and returns the reply to show.
    ///
    /// Transitions for the same user are serialized; the state is read and
    /// written under that user's lock.
    ///
    /// # Errors
    /// `InvalidInput` for a blank user id or a blank question, `Llm` when
    /// generation fails. In both cases the stored state is left untouched.
    pub async fn handle_message(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<ChatReply, ServiceError> {
        self.handle_message_with_session(user_id, message).await.map(|(reply, _)| reply)
    }

    /// Like [`Self::handle_message`], also returning the state this message
    /// left behind, read before the user's lock is released.
    ///
    /// # Errors
    /// Same as [`Self::handle_message`].
    pub async fn handle_message_with_session(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<(ChatReply, SessionState), ServiceError> {
        if user_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput("user id must not be empty".to_owned()));
        }

        let _guard = self.locks.acquire(user_id).await;
        let reply = match self.store.get(user_id).await {
            SessionState::Idle => self.generate_candidate(user_id, message).await?,
            SessionState::AwaitingConfirmation(pending) => {
                self.resolve_confirmation(user_id, message, pending).await?
            },
        };
        let session = self.store.get(user_id).await;
        Ok((reply, session))
    }

    /// Current state for `user_id`.
    pub async fn session(&self, user_id: &str) -> SessionState {
        self.store.get(user_id).await
    }

    /// Drops any pending query for `user_id`. Returns `true` if one existed.
    pub async fn reset(&self, user_id: &str) -> bool {
        let _guard = self.locks.acquire(user_id).await;
        self.store.remove(user_id).await
    }

    /// Number of users currently awaiting confirmation.
    pub async fn pending_count(&self) -> usize {
        self.store.pending_count().await
    }

    async fn generate_candidate(
        &self,
        user_id: &str,
        question: &str,
    ) -> Result<ChatReply, ServiceError> {
        if question.trim().is_empty() {
            return Err(ServiceError::InvalidInput("question must not be empty".to_owned()));
        }

        let output = self.generator.generate(question).await.map_err(|e| {
            tracing::warn!(user_id, error = %e, "KQL generation failed");
            e
        })?;
        let kql = extract_kql(&output);
        tracing::info!(user_id, kql_len = kql.len(), "generated KQL candidate");
        tracing::debug!(user_id, kql = %kql, "candidate query");

        self.store
            .put(user_id, SessionState::AwaitingConfirmation(PendingQuery::new(kql.clone())))
            .await;
        Ok(ChatReply::Candidate { kql })
    }

    async fn resolve_confirmation(
        &self,
        user_id: &str,
        message: &str,
        pending: PendingQuery,
    ) -> Result<ChatReply, ServiceError> {
        self.store.put(user_id, SessionState::Idle).await;

        if !is_confirmation(message) {
            tracing::info!(user_id, "pending query rejected");
            if self.config.reprocess_rejected && !message.trim().is_empty() {
                return self.generate_candidate(user_id, message).await;
            }
            return Ok(ChatReply::Rejected);
        }

        tracing::info!(user_id, "pending query confirmed, executing");
        let reply = match self.executor.execute(&pending.kql_text, &self.config.credentials).await
        {
            Ok(payload) => ChatReply::Results { payload },
            Err(e) => {
                tracing::warn!(user_id, status = ?e.status_code(), error = %e, "query execution failed");
                ChatReply::Error { detail: e.detail() }
            },
        };
        Ok(reply)
    }
}

/// `yes` or `y`, ignoring case and surrounding whitespace.
#[must_use]
pub fn is_confirmation(message: &str) -> bool {
    let answer = message.trim().to_lowercase();
    CONFIRM_WORDS.contains(&answer.as_str())
}
