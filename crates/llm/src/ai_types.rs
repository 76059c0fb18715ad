use kql_assist_core::AssistantMessage;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Serialize)]
pub(crate) struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub(crate) fn system(content: &str) -> Self {
        Self { role: "system".to_owned(), content: content.to_owned() }
    }

    pub(crate) fn user(content: &str) -> Self {
        Self { role: "user".to_owned(), content: content.to_owned() }
    }
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: AssistantMessage,
}
