//! Agent configuration from TOML (`[agent]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolloop_application::LoopParams;
use toolloop_domain::{ConfigIssue, ConfigIssueCode, IterationBudget, LoopMode, Model};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// mode = "react"                 # "react" or "tool-calling"
/// max_iterations = 5
/// self_check = true              # react mode only
/// timeout_seconds = 60
/// parallel_tool_calls = false    # tool-calling mode only
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub mode: String,
    pub max_iterations: usize,
    pub self_check: bool,
    pub timeout_seconds: u64,
    pub parallel_tool_calls: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = LoopParams::default();
        Self {
            mode: LoopMode::default().as_str().to_string(),
            max_iterations: params.budget.get(),
            self_check: params.self_check,
            timeout_seconds: params.gateway_timeout.as_secs(),
            parallel_tool_calls: params.parallel_tool_calls,
        }
    }
}

impl FileAgentConfig {
    /// Parse mode string into LoopMode, returning warnings on failure.
    ///
    /// Accepts: "react", "text", "tool-calling", "tool_calling", "tools"
    pub fn parse_mode(&self) -> (LoopMode, Vec<ConfigIssue>) {
        match self.mode.parse::<LoopMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnknownLoopMode,
                    format!(
                        "agent.mode: unknown value '{}', falling back to '{}'",
                        self.mode,
                        LoopMode::default()
                    ),
                );
                (LoopMode::default(), vec![issue])
            }
        }
    }

    /// Build loop parameters for `model`.
    pub fn to_loop_params(&self, model: Model) -> Result<LoopParams, ConfigValidationError> {
        let budget = IterationBudget::new(self.max_iterations)
            .map_err(|_| ConfigValidationError::ZeroIterations)?;
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        // Temperature is not configurable: both loops sample at 0.0.
        Ok(LoopParams::default()
            .with_model(model)
            .with_budget(budget)
            .with_self_check(self.self_check)
            .with_gateway_timeout(Duration::from_secs(self.timeout_seconds))
            .with_parallel_tool_calls(self.parallel_tool_calls))
    }
}
