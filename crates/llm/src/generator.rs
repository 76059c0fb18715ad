use async_trait::async_trait;
use kql_assist_core::AgentOutput;

use crate::ai_types::{ChatRequest, Message};
use crate::client::{LlmClient, truncate};
use crate::error::LlmError;

/// System prompt steering the model towards bare KQL output.
pub const KQL_SYSTEM_PROMPT: &str = r"You translate questions about Azure Application Insights telemetry into Kusto Query Language (KQL).

Rules:
- Answer with a single KQL query and nothing else.
- Never ask follow-up questions.
- No prose, comments or explanations.
- When the question is vague, assume the standard Application Insights tables: requests, traces, dependencies, exceptions, customEvents, pageViews.

The answer must be a valid KQL query that runs as-is against Application Insights.";

/// Turns a natural-language question into a candidate KQL answer.
///
/// The returned output is not cleaned; callers pass it through
/// [`kql_assist_core::extract_kql`].
#[async_trait]
pub trait QueryGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> Result<AgentOutput, LlmError>;
}

#[async_trait]
impl QueryGenerator for LlmClient {
    async fn generate(&self, question: &str) -> Result<AgentOutput, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(KQL_SYSTEM_PROMPT), Message::user(question)],
            temperature: Some(0.0),
        };
        tracing::debug!(model = %self.model, question = %truncate(question, 200), "generating KQL");
        let message = self.chat_completion(&request).await?;
        Ok(AgentOutput::Message(message))
    }
}
