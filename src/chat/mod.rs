//! Conversational core for Quantbot.
//!
//! Ties together the generic-question classifier, the conversation
//! history, and the response orchestrator.

pub mod classifier;
pub mod history;
pub mod responder;

pub use classifier::{is_generic, GENERIC_REPLY};
pub use history::{ChatHistory, ChatMessage};
pub use responder::{Responder, FALLBACK_REPLY};
