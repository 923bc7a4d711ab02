//! Domain layer for toolloop
//!
//! This crate contains the core entities and value objects of the agent
//! loops. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An append-only sequence of [`Turn`]s, seeded with a system turn and the
//! user's question, extended by one assistant turn and its observations per
//! iteration.
//!
//! ## Tools
//!
//! A [`Tool`] declares a [`ToolSpec`] and executes [`ToolArguments`]. Tool
//! failures are payloads, never loop errors.
//!
//! ## Two protocols
//!
//! - **Text protocol**: model output is decoded by an [`ActionDecoder`] into
//!   a [`Decision`].
//! - **Structured calls**: the model returns [`ToolCallRequest`]s directly.

pub mod agent;
pub mod completion;
pub mod config;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod tool;

// Re-export commonly used types
pub use agent::{
    ActionDecoder, Decision, IterationBudget, LoopOutcome, LoopResult, ReactGrammarDecoder,
};
pub use completion::{Completion, CompletionOptions, StopReason, ToolChoice};
pub use config::{ConfigIssue, ConfigIssueCode, LoopMode, OutputFormat, Severity};
pub use conversation::{Conversation, Role, Turn};
pub use core::{error::DomainError, model::Model, provider::Provider};
pub use prompt::AgentPromptTemplate;
pub use tool::{
    DefaultToolValidator, Tool, ToolArguments, ToolCallRequest, ToolError, ToolExecutionRecord,
    ToolParameter, ToolSpec, ToolValidator, error_payload,
};
