//! Completion result returned by a gateway

use crate::tool::ToolCallRequest;
use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants tools executed.
    ToolCalls,
    /// Hit the token limit; the text may be truncated.
    MaxTokens,
    /// Hit one of the requested stop sequences.
    StopSequence,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    /// Map a provider `finish_reason` string.
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" | "end_turn" => StopReason::EndTurn,
            "tool_calls" | "tool_use" | "function_call" => StopReason::ToolCalls,
            "length" | "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// A model completion: a text body, structured tool calls, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl Completion {
    /// Create a text-only completion.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            stop_reason: Some(StopReason::EndTurn),
            ..Default::default()
        }
    }

    pub fn with_tool_calls(text: Option<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            text,
            tool_calls,
            stop_reason: Some(StopReason::ToolCalls),
            model: None,
        }
    }

    /// Text body, or the empty string when the model produced none.
    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let completion = Completion::from_text("Thought: I know this.");
        assert_eq!(completion.text_content(), "Thought: I know this.");
        assert!(!completion.has_tool_calls());
        assert_eq!(completion.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn test_tool_call_completion_without_text() {
        let completion = Completion::with_tool_calls(
            None,
            vec![ToolCallRequest::new("call_1", "calculate", "{}")],
        );
        assert_eq!(completion.text_content(), "");
        assert!(completion.has_tool_calls());
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(StopReason::from_finish_reason("stop"), StopReason::EndTurn);
        assert_eq!(
            StopReason::from_finish_reason("tool_calls"),
            StopReason::ToolCalls
        );
        assert_eq!(StopReason::from_finish_reason("length"), StopReason::MaxTokens);
        assert_eq!(
            StopReason::from_finish_reason("content_filter"),
            StopReason::Other("content_filter".to_string())
        );
    }
}
