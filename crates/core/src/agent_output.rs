//! What the query-generation agent hands back.
//!
//! Agents are not consistent about their output shape: chat APIs return a
//! message object, tool-calling frameworks return mappings, and some just
//! return text. [`AgentOutput`] captures the three shapes so the extractor can
//! resolve them by variant instead of probing at runtime.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Assistant message as returned by a chat completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default = "default_role")]
    pub role: String,
    /// `null` (refusals, tool calls) reads as empty text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn default_role() -> String {
    "assistant".to_owned()
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AssistantMessage {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self { role: default_role(), content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// An object exposing a `content` text field.
    Message(AssistantMessage),
    /// A mapping that may carry a `content` key.
    Mapping(Map<String, Value>),
    /// Anything else, already coerced to text.
    Raw(String),
}

impl AgentOutput {
    /// Unwraps an agent invocation result.
    ///
    /// Results carrying an `output` key are unwrapped to that value; anything
    /// else is taken as-is.
    #[must_use]
    pub fn from_invocation(result: Value) -> Self {
        match result {
            Value::Object(mut map) => match map.remove("output") {
                Some(output) => Self::from(output),
                None => Self::Mapping(map),
            },
            other => Self::from(other),
        }
    }

    /// Resolves the output to plain text.
    ///
    /// Priority: message content, then a mapping's `content` key, then the
    /// value's text form.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Message(msg) => msg.content.clone(),
            Self::Mapping(map) => match map.get("content") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => Value::Object(map.clone()).to_string(),
            },
            Self::Raw(text) => text.clone(),
        }
    }
}

impl From<Value> for AgentOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            Value::String(s) => Self::Raw(s),
            other => Self::Raw(other.to_string()),
        }
    }
}

impl From<AssistantMessage> for AgentOutput {
    fn from(msg: AssistantMessage) -> Self {
        Self::Message(msg)
    }
}

impl From<String> for AgentOutput {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for AgentOutput {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_owned())
    }
}
