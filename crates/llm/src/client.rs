use std::time::Duration;

use kql_assist_core::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MODEL};
use kql_assist_core::{AssistantMessage, env_parse_with_default, env_string_with_default};

use crate::ai_types::{ChatRequest, ChatResponse};
use crate::error::LlmError;

/// Maximum number of retries after the first attempt.
const MAX_RETRIES: usize = 3;

/// Client for OpenAI-compatible chat completion APIs.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) retry_delays: Vec<Duration>,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl LlmClient {
    /// Creates a new LLM client with the given API key and base URL.
    ///
    /// The model comes from `KQL_ASSIST_MODEL` and the request timeout from
    /// `KQL_ASSIST_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let model = env_string_with_default("KQL_ASSIST_MODEL", DEFAULT_MODEL);
        let timeout_secs =
            env_parse_with_default("KQL_ASSIST_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        let retry_delays = [1, 2, 4].into_iter().map(Duration::from_secs).collect();
        Ok(Self { client, api_key, base_url, model, retry_delays })
    }

    /// Sets a custom model for this client.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Overrides the delays slept before each retry.
    #[must_use]
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request and return the first assistant message.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the response body cannot be parsed, or the choices
    /// array is empty.
    pub(crate) async fn chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<AssistantMessage, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = self
                    .retry_delays
                    .get(attempt.saturating_sub(1))
                    .or_else(|| self.retry_delays.last())
                    .copied()
                    .unwrap_or_default();
                tokio::time::sleep(delay).await;
                tracing::warn!("LLM retry attempt {attempt}/{MAX_RETRIES} after {delay:?}");
            }

            let response_result = self
                .client
                .post(format!("{}/v1/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(request)
                .send()
                .await;

            let response = match response_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(LlmError::HttpRequest(e));
                        continue;
                    },
                };

                let chat_response: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                        context: format!(
                            "chat completion response (body: {})",
                            truncate(&body, 200)
                        ),
                        source: e,
                    })?;

                let first_choice =
                    chat_response.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
                if first_choice.message.content.trim().is_empty() {
                    return Err(LlmError::EmptyResponse);
                }

                return Ok(first_choice.message);
            }

            let status_code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());

            let err = LlmError::HttpStatus { code: status_code, body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(LlmError::RetriesExhausted(Box::new(last_error.unwrap_or(LlmError::EmptyResponse))))
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
