//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the bounded gateway call used by
//! both loops and by self-verification.

use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::use_cases::types::AgentLoopError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use toolloop_domain::{
    Completion, CompletionOptions, Conversation, LoopResult, ToolExecutionRecord,
};

/// Check if cancellation has been requested.
///
/// Returns `Err(AgentLoopError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), AgentLoopError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(AgentLoopError::Cancelled);
    }
    Ok(())
}

/// Issue one gateway call under a timeout, racing it against cancellation.
///
/// On cancellation the in-flight call future is dropped, which closes the
/// underlying request. A timeout is fatal for the run; nothing is retried.
pub(crate) async fn complete_bounded<G>(
    gateway: &G,
    conversation: &Conversation,
    options: &CompletionOptions,
    timeout: Duration,
    cancellation_token: &Option<CancellationToken>,
) -> Result<Completion, AgentLoopError>
where
    G: CompletionGateway + ?Sized,
{
    check_cancelled(cancellation_token)?;

    let call = tokio::time::timeout(timeout, gateway.complete(conversation, options));

    let outcome = match cancellation_token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(AgentLoopError::Cancelled),
                outcome = call => outcome,
            }
        }
        None => call.await,
    };

    match outcome {
        Ok(result) => Ok(result?),
        Err(_elapsed) => Err(AgentLoopError::GatewayTimeout(timeout)),
    }
}

/// Mutable bookkeeping of one run, kept outside the loop body so a
/// cancelled run can still report how far it got.
#[derive(Debug, Default)]
pub(crate) struct LoopState {
    /// Iterations started so far.
    pub iterations: usize,
    pub trace: String,
    pub records: Vec<ToolExecutionRecord>,
}

impl LoopState {
    /// Append a text-protocol note to both the trace and the conversation.
    pub fn note(&mut self, conversation: &mut Conversation, note: &str) {
        self.trace.push('\n');
        self.trace.push_str(note);
        self.trace.push('\n');
        conversation.push_observation(note);
    }

    pub fn trace_line(&mut self, line: &str) {
        if !self.trace.is_empty() {
            self.trace.push('\n');
        }
        self.trace.push_str(line);
    }

    pub fn answered(&mut self, answer: impl Into<String>) -> LoopResult {
        LoopResult::answered(answer, self.iterations, std::mem::take(&mut self.trace))
            .with_tool_executions(std::mem::take(&mut self.records))
    }

    pub fn exhausted(&mut self) -> LoopResult {
        LoopResult::budget_exhausted(self.iterations, std::mem::take(&mut self.trace))
            .with_tool_executions(std::mem::take(&mut self.records))
    }

    pub fn into_cancelled(self) -> LoopResult {
        LoopResult::cancelled(self.iterations, self.trace).with_tool_executions(self.records)
    }
}

pub(crate) fn log_finished(logger: &dyn ConversationLogger, result: &LoopResult) {
    logger.log(ConversationEvent::new(
        "loop_finished",
        serde_json::json!({
            "outcome": result.outcome.as_str(),
            "iterations": result.iterations,
            "final_answer": result.final_answer,
            "tool_executions": result.tool_executions.len(),
        }),
    ));
}
