//! Service layer for kql-assist
//!
//! Owns the per-user confirm-then-run conversation: the session store, the
//! per-user locking and the state machine tying generation, extraction and
//! execution together.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod conversation;
mod error;
mod session_store;
mod user_locks;

#[cfg(test)]
mod conversation_tests;

pub use conversation::{ConversationConfig, ConversationService, is_confirmation};
pub use error::ServiceError;
pub use session_store::{InMemorySessionStore, SessionStore};
