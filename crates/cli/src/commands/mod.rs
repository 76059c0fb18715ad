pub(crate) mod chat;
pub(crate) mod extract;
pub(crate) mod query;
pub(crate) mod serve;

use std::sync::Arc;

use anyhow::Result;
use kql_assist_backend::QueryExecutor;
use kql_assist_llm::LlmClient;
use kql_assist_service::{ConversationConfig, ConversationService, InMemorySessionStore};

use crate::{get_credentials, get_llm_api_key, get_llm_url, reprocess_rejected};

/// Wires a conversation service from environment configuration.
pub(crate) fn build_conversation(
    executor: Arc<dyn QueryExecutor>,
) -> Result<Arc<ConversationService>> {
    let llm = LlmClient::new(get_llm_api_key()?, get_llm_url())?;
    tracing::info!(model = %llm.model(), url = %llm.base_url(), "LLM client ready");
    let config = ConversationConfig::new(get_credentials()?)
        .with_reprocess_rejected(reprocess_rejected());
    Ok(Arc::new(ConversationService::new(
        Arc::new(llm),
        executor,
        Arc::new(InMemorySessionStore::new()),
        config,
    )))
}
