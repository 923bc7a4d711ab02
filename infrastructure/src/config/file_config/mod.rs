//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Enum-like fields stay strings here so a typo degrades to a warning
//! instead of a parse failure.

mod agent;
mod provider;
mod tools;

pub use agent::FileAgentConfig;
pub use provider::FileProviderConfig;
pub use tools::FileToolsConfig;

use crate::tools::BuiltinTool;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use toolloop_application::LoopParams;
use toolloop_domain::{ConfigIssue, LoopMode, Provider};

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("agent.max_iterations must be at least 1")]
    ZeroIterations,

    #[error("agent.timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// conversation_log = "~/.local/share/toolloop/runs.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every run; disabled when unset
    pub conversation_log: Option<String>,
}

impl FileLoggingConfig {
    /// The transcript path with a leading `~/` expanded.
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        let raw = self.conversation_log.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoint settings
    pub provider: FileProviderConfig,
    /// Loop settings
    pub agent: FileAgentConfig,
    /// Enabled builtin tools
    pub tools: FileToolsConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

/// Configuration after parsing, ready to wire a run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: Option<String>,
    pub mode: LoopMode,
    pub params: LoopParams,
    pub tools: Vec<BuiltinTool>,
    pub conversation_log: Option<PathBuf>,
    /// Everything that fell back to a default, plus fatal issues.
    pub issues: Vec<ConfigIssue>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let (provider, provider_issues) = self.provider.parse_provider();
        issues.extend(provider_issues);
        issues.extend(self.provider.resolve_api_key(provider).1);
        issues.extend(self.agent.parse_mode().1);
        issues.extend(self.tools.parse_enabled().1);
        issues
    }

    /// Parse every section.
    ///
    /// Soft problems are collected into [`ResolvedConfig::issues`]; only
    /// values no loop can run with are returned as errors.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigValidationError> {
        let mut issues = Vec::new();

        let (provider, provider_issues) = self.provider.parse_provider();
        issues.extend(provider_issues);

        let (api_key, key_issues) = self.provider.resolve_api_key(provider);
        issues.extend(key_issues);

        let (mode, mode_issues) = self.agent.parse_mode();
        issues.extend(mode_issues);

        let (tools, tool_issues) = self.tools.parse_enabled();
        issues.extend(tool_issues);

        let params = self.agent.to_loop_params(self.provider.model(provider))?;

        Ok(ResolvedConfig {
            provider,
            base_url: self.provider.base_url(provider),
            api_key,
            mode,
            params,
            tools,
            conversation_log: self.logging.conversation_log_path(),
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolloop_domain::ConfigIssueCode;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
name = "openai"
model = "gpt-4o-mini"
api_key = "sk-test"

[agent]
mode = "tool-calling"
max_iterations = 8
self_check = false
parallel_tool_calls = true

[tools]
enabled = ["calculate"]

[logging]
conversation_log = "/tmp/runs.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.provider, Provider::OpenAi);
        assert_eq!(resolved.base_url, "https://api.openai.com/v1");
        assert_eq!(resolved.api_key.as_deref(), Some("sk-test"));
        assert_eq!(resolved.mode, LoopMode::ToolCalling);
        assert_eq!(resolved.params.model.as_str(), "gpt-4o-mini");
        assert_eq!(resolved.params.budget.get(), 8);
        assert!(!resolved.params.self_check);
        assert!(resolved.params.parallel_tool_calls);
        assert_eq!(resolved.tools, vec![BuiltinTool::Calculate]);
        assert_eq!(
            resolved.conversation_log,
            Some(PathBuf::from("/tmp/runs.jsonl"))
        );
        assert!(resolved.issues.is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[agent]
max_iterations = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.max_iterations, 3);
        // Defaults should apply
        assert_eq!(config.agent.mode, "react");
        assert!(config.agent.self_check);
        assert_eq!(config.provider.name, "deepseek");
        assert_eq!(config.tools, FileToolsConfig::default());
    }

    #[test]
    fn test_invalid_values_become_warnings() {
        let config = FileConfig {
            provider: FileProviderConfig {
                name: "nope".to_string(),
                api_key: Some("k".to_string()),
                ..Default::default()
            },
            agent: FileAgentConfig {
                mode: "nope".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.provider, Provider::DeepSeek);
        assert_eq!(resolved.mode, LoopMode::React);

        let codes: Vec<_> = resolved.issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![ConfigIssueCode::UnknownProvider, ConfigIssueCode::UnknownLoopMode]
        );
        assert!(!ConfigIssue::has_errors(&resolved.issues));
    }

    #[test]
    fn test_zero_iterations_is_error() {
        let mut config = FileConfig::default();
        config.agent.max_iterations = 0;
        assert_eq!(
            config.resolve().unwrap_err(),
            ConfigValidationError::ZeroIterations
        );
    }

    #[test]
    fn test_empty_conversation_log_is_disabled() {
        let logging = FileLoggingConfig {
            conversation_log: Some("  ".to_string()),
        };
        assert!(logging.conversation_log_path().is_none());
    }
}
