//! Type definitions shared by the loop use cases.

use crate::config::LoopParams;
use crate::ports::completion_gateway::GatewayError;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a loop run.
///
/// Tool failures are not here: they become observations. Budget exhaustion
/// and cancellation are not here either: both are [`LoopResult`]
/// outcomes.
///
/// [`LoopResult`]: toolloop_domain::LoopResult
#[derive(Error, Debug)]
pub enum AgentLoopError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Gateway call timed out after {0:?}")]
    GatewayTimeout(Duration),

    /// Raised internally when the token fires; `execute` turns it into a
    /// cancelled result.
    #[error("Operation cancelled")]
    Cancelled,
}

impl AgentLoopError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AgentLoopError::Cancelled)
    }

    /// Check if the completion endpoint failed or timed out
    pub fn is_gateway_failure(&self) -> bool {
        matches!(
            self,
            AgentLoopError::Gateway(_) | AgentLoopError::GatewayTimeout(_)
        )
    }
}

/// Input for a loop run
#[derive(Debug, Clone)]
pub struct LoopInput {
    /// The user's question
    pub question: String,
    pub params: LoopParams,
}

impl LoopInput {
    pub fn new(question: impl Into<String>, params: LoopParams) -> Self {
        Self {
            question: question.into(),
            params,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AgentLoopError> {
        if self.question.trim().is_empty() {
            return Err(AgentLoopError::InvalidInput(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error() {
        let error = AgentLoopError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
        assert!(error.is_cancelled());
        assert!(!error.is_gateway_failure());
    }

    #[test]
    fn test_gateway_failures() {
        let errors = vec![
            AgentLoopError::Gateway(GatewayError::Connection("refused".to_string())),
            AgentLoopError::GatewayTimeout(Duration::from_secs(1)),
        ];
        for error in errors {
            assert!(error.is_gateway_failure(), "{:?} should be a gateway failure", error);
            assert!(!error.is_cancelled());
        }
    }

    #[test]
    fn test_blank_question_is_rejected() {
        let input = LoopInput::new("   ", LoopParams::default());
        assert!(matches!(
            input.validate(),
            Err(AgentLoopError::InvalidInput(_))
        ));
        assert!(LoopInput::new("2+2?", LoopParams::default()).validate().is_ok());
    }
}
