//! Completion contract types
//!
//! ```text
//! Conversation + CompletionOptions ──▶ gateway ──▶ Completion
//! ```
//!
//! The text protocol reads [`Completion::text_content`]; the structured
//! protocol reads [`Completion::tool_calls`] first.

pub mod request;
pub mod response;

pub use request::{CompletionOptions, ToolChoice};
pub use response::{Completion, StopReason};
