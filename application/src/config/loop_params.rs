//! Loop parameters: per-run control knobs.
//!
//! [`LoopParams`] groups the static parameters both loop use cases read.
//! They are application-layer concerns, resolved from file config and CLI
//! flags before a run starts.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolloop_domain::{IterationBudget, Model, Provider};

/// Loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopParams {
    /// Model every completion request is addressed to.
    pub model: Model,
    /// Maximum number of model-call rounds.
    pub budget: IterationBudget,
    /// Verify candidate answers with an extra completion (text protocol only).
    pub self_check: bool,
    /// Upper bound on a single gateway call.
    pub gateway_timeout: Duration,
    /// Sampling temperature; 0.0 keeps action selection reproducible.
    pub temperature: f32,
    /// Execute the tool calls of one structured iteration concurrently.
    pub parallel_tool_calls: bool,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            model: Provider::default().default_model(),
            budget: IterationBudget::default(),
            self_check: true,
            gateway_timeout: Duration::from_secs(60),
            temperature: 0.0,
            parallel_tool_calls: false,
        }
    }
}

impl LoopParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_budget(mut self, budget: IterationBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_self_check(mut self, enabled: bool) -> Self {
        self.self_check = enabled;
        self
    }

    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    pub fn with_parallel_tool_calls(mut self, enabled: bool) -> Self {
        self.parallel_tool_calls = enabled;
        self
    }
}
