//! Tools configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! enabled = ["calculate", "get_weather"]
//! ```
//!
//! Tools are registered in the listed order; duplicates are ignored.

use crate::tools::BuiltinTool;
use serde::{Deserialize, Serialize};
use toolloop_domain::{ConfigIssue, ConfigIssueCode};

/// Raw tools configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Builtin tool names to register
    pub enabled: Vec<String>,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            enabled: BuiltinTool::all()
                .iter()
                .map(|t| t.name().to_string())
                .collect(),
        }
    }
}

impl FileToolsConfig {
    /// Parse enabled tool names, skipping unknown ones with a warning.
    pub fn parse_enabled(&self) -> (Vec<BuiltinTool>, Vec<ConfigIssue>) {
        let mut tools = Vec::new();
        let mut issues = Vec::new();

        for name in &self.enabled {
            match name.parse::<BuiltinTool>() {
                Ok(tool) if !tools.contains(&tool) => tools.push(tool),
                Ok(_) => {}
                Err(_) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownTool,
                    format!("tools.enabled: unknown tool '{}', skipping", name),
                )),
            }
        }

        if tools.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoToolsEnabled,
                "tools.enabled: no tools enabled, the model can only answer directly",
            ));
        }

        (tools, issues)
    }
}
