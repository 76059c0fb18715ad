//! LLM client for natural-language to KQL generation

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]

mod ai_types;
mod client;
mod error;
mod generator;

#[cfg(test)]
mod tests;

pub use client::{LlmClient, truncate};
pub use error::LlmError;
pub use generator::{KQL_SYSTEM_PROMPT, QueryGenerator};
