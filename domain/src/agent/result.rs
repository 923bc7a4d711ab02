//! Loop result types

use crate::tool::ToolExecutionRecord;
use serde::{Deserialize, Serialize};

/// How a loop run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopOutcome {
    /// A final answer was produced (and verified, if self-check was on).
    Answered,
    /// The iteration budget ran out without an accepted answer.
    BudgetExhausted,
    /// The caller cancelled the run.
    Cancelled,
}

impl LoopOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopOutcome::Answered => "answered",
            LoopOutcome::BudgetExhausted => "budget_exhausted",
            LoopOutcome::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for LoopOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one loop run, handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopResult {
    pub final_answer: String,
    /// Iterations actually consumed.
    pub iterations: usize,
    pub outcome: LoopOutcome,
    /// Accumulated transcript of the run.
    pub trace: String,
    #[serde(default)]
    pub tool_executions: Vec<ToolExecutionRecord>,
}

impl LoopResult {
    pub const BUDGET_EXHAUSTED_MESSAGE: &'static str =
        "Could not reach an answer within the iteration budget.";
    pub const CANCELLED_MESSAGE: &'static str =
        "The run was cancelled before an answer was reached.";

    pub fn answered(answer: impl Into<String>, iterations: usize, trace: String) -> Self {
        Self {
            final_answer: answer.into(),
            iterations,
            outcome: LoopOutcome::Answered,
            trace,
            tool_executions: Vec::new(),
        }
    }

    pub fn budget_exhausted(iterations: usize, trace: String) -> Self {
        Self {
            final_answer: Self::BUDGET_EXHAUSTED_MESSAGE.to_string(),
            iterations,
            outcome: LoopOutcome::BudgetExhausted,
            trace,
            tool_executions: Vec::new(),
        }
    }

    pub fn cancelled(iterations: usize, trace: String) -> Self {
        Self {
            final_answer: Self::CANCELLED_MESSAGE.to_string(),
            iterations,
            outcome: LoopOutcome::Cancelled,
            trace,
            tool_executions: Vec::new(),
        }
    }

    pub fn with_tool_executions(mut self, records: Vec<ToolExecutionRecord>) -> Self {
        self.tool_executions = records;
        self
    }

    pub fn is_answered(&self) -> bool {
        self.outcome == LoopOutcome::Answered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exhausted_uses_fixed_message() {
        let result = LoopResult::budget_exhausted(3, "trace".to_string());
        assert_eq!(result.final_answer, LoopResult::BUDGET_EXHAUSTED_MESSAGE);
        assert_eq!(result.iterations, 3);
        assert!(!result.is_answered());
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&LoopOutcome::BudgetExhausted).unwrap();
        assert_eq!(json, "\"budget_exhausted\"");
    }

    #[test]
    fn test_answered_with_records() {
        let result = LoopResult::answered("120", 2, String::new()).with_tool_executions(vec![
            ToolExecutionRecord::new("calculate", "(15+25)*3", "120"),
        ]);
        assert!(result.is_answered());
        assert_eq!(result.tool_executions.len(), 1);
    }
}
