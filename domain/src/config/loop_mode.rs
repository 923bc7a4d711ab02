//! Loop mode value object

use serde::{Deserialize, Serialize};

/// Which loop variant answers a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopMode {
    /// Text protocol: Thought / Action / Action Input / Final Answer.
    #[default]
    React,
    /// Native function calling with tool schemas.
    ToolCalling,
}

impl LoopMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopMode::React => "react",
            LoopMode::ToolCalling => "tool-calling",
        }
    }
}

impl std::fmt::Display for LoopMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoopMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "react" | "text" => Ok(LoopMode::React),
            "tool-calling" | "tool_calling" | "tools" | "function-calling" => {
                Ok(LoopMode::ToolCalling)
            }
            other => Err(format!("unknown loop mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("react".parse::<LoopMode>().unwrap(), LoopMode::React);
        assert_eq!("tools".parse::<LoopMode>().unwrap(), LoopMode::ToolCalling);
        assert_eq!(
            "Tool_Calling".parse::<LoopMode>().unwrap(),
            LoopMode::ToolCalling
        );
        assert!("planner".parse::<LoopMode>().is_err());
    }

    #[test]
    fn test_serialize_kebab_case() {
        let json = serde_json::to_string(&LoopMode::ToolCalling).unwrap();
        assert_eq!(json, "\"tool-calling\"");
    }
}
