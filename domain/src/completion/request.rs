//! Per-call completion options

use crate::core::model::Model;
use crate::tool::ToolSpec;
use serde::{Deserialize, Serialize};

/// How the model may use the tools offered with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolChoice {
    /// The model decides whether to call tools.
    #[default]
    Auto,
    /// Tools are offered but must not be called.
    None,
    /// The model must call the named tool.
    Specific(String),
}

/// Options sent alongside a conversation on each completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: Model,
    pub temperature: f32,
    /// Stop sequences; generation halts before any of them.
    pub stop: Vec<String>,
    /// Tool declarations for structured calls. Empty for the text protocol.
    pub tools: Vec<ToolSpec>,
    pub tool_choice: ToolChoice,
}

impl CompletionOptions {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            temperature: 0.0,
            stop: Vec::new(),
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        self.stop.push(stop.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>, choice: ToolChoice) -> Self {
        self.tools = tools;
        self.tool_choice = choice;
        self
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_deterministic_without_tools() {
        let opts = CompletionOptions::new(Model::new("deepseek-chat"));
        assert_eq!(opts.temperature, 0.0);
        assert!(opts.stop.is_empty());
        assert!(!opts.has_tools());
        assert_eq!(opts.tool_choice, ToolChoice::Auto);
    }

    #[test]
    fn test_builder() {
        let opts = CompletionOptions::new(Model::new("m"))
            .with_stop("Observation:")
            .with_tools(vec![ToolSpec::new("calculate", "math")], ToolChoice::Auto);
        assert_eq!(opts.stop, vec!["Observation:".to_string()]);
        assert!(opts.has_tools());
    }
}
