//! Completion Gateway port
//!
//! Defines the interface for turning a conversation into a model completion.

use async_trait::async_trait;
use thiserror::Error;
use toolloop_domain::{Completion, CompletionOptions, Conversation};

/// Errors that can occur during gateway operations
///
/// Transport and auth failures are always surfaced here, never as an
/// empty completion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for model completions
///
/// This port defines how the application layer talks to a completion
/// endpoint. Implementations (adapters) live in the infrastructure layer.
/// Retry policy, if any, belongs to the implementation.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Complete the conversation with the given options.
    async fn complete(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> Result<Completion, GatewayError>;
}
