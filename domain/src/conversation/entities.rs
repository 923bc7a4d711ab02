//! Conversation domain entities

use crate::tool::ToolCallRequest;
use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn of a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    /// Text body. Assistant turns that only carry tool calls have none.
    pub content: Option<String>,
    /// Tool calls requested by an assistant turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// For tool turns: the call this turn answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// For tool turns: the tool that produced the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Turn {
    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    pub fn assistant_with_tool_calls(
        content: Option<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls,
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn tool_result(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
            tool_name: Some(tool_name.into()),
        }
    }

    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Ordered, append-only conversation (Entity)
///
/// If present, the first turn is the system turn, and only the constructor
/// can create it. Turns are never reordered or removed except by
/// [`reset`](Self::reset), which truncates back to the system turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(prompt)],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.turns
            .first()
            .filter(|t| t.role == Role::System)
            .map(Turn::content_str)
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    pub fn push_assistant_tool_calls(
        &mut self,
        content: Option<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) {
        self.turns
            .push(Turn::assistant_with_tool_calls(content, tool_calls));
    }

    pub fn push_tool_result(
        &mut self,
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.turns
            .push(Turn::tool_result(call_id, tool_name, content));
    }

    /// Append a text-protocol note (`Observation:` / `Thought:`) as a user turn.
    ///
    /// The text protocol has no call identifiers, and chat APIs reject tool
    /// turns without one.
    pub fn push_observation(&mut self, content: impl Into<String>) {
        self.push_user(content);
    }

    /// Drop every turn after the system turn.
    pub fn reset(&mut self) {
        let keep = usize::from(self.system_prompt().is_some());
        self.turns.truncate(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_turn_comes_first() {
        let mut conv = Conversation::with_system_prompt("You are a helpful assistant.");
        conv.push_user("What is 2 + 2?");
        conv.push_assistant("Final Answer: 4");

        assert_eq!(conv.len(), 3);
        assert_eq!(conv.turns()[0].role, Role::System);
        assert_eq!(conv.system_prompt(), Some("You are a helpful assistant."));
        assert_eq!(conv.last().unwrap().content_str(), "Final Answer: 4");
    }

    #[test]
    fn test_conversation_without_system_prompt() {
        let mut conv = Conversation::new();
        assert!(conv.is_empty());
        conv.push_user("hi");
        assert!(conv.system_prompt().is_none());
    }

    #[test]
    fn test_tool_turns_carry_correlation() {
        let mut conv = Conversation::new();
        conv.push_assistant_tool_calls(
            None,
            vec![ToolCallRequest::new("call_1", "get_weather", r#"{"city":"Paris"}"#)],
        );
        conv.push_tool_result("call_1", "get_weather", "Paris: 18°C, cloudy");

        let assistant = &conv.turns()[0];
        assert!(assistant.content.is_none());
        assert_eq!(assistant.tool_calls.len(), 1);

        let tool = &conv.turns()[1];
        assert_eq!(tool.role, Role::Tool);
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(tool.tool_name.as_deref(), Some("get_weather"));
    }

    #[test]
    fn test_observations_are_user_turns() {
        let mut conv = Conversation::new();
        conv.push_observation("Observation: 120");
        assert_eq!(conv.turns()[0].role, Role::User);
    }

    #[test]
    fn test_reset_keeps_system_turn() {
        let mut conv = Conversation::with_system_prompt("system");
        conv.push_user("a");
        conv.push_assistant("b");
        conv.reset();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.system_prompt(), Some("system"));

        let mut bare = Conversation::new();
        bare.push_user("a");
        bare.reset();
        assert!(bare.is_empty());
    }
}
