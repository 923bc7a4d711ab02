//! Tool domain entities

use super::arguments::ToolArguments;
use serde::{Deserialize, Serialize};

/// Declaration of a tool the model may invoke.
///
/// A spec is fixed once its tool is registered; the description and
/// parameters are what the model sees, either in the text-protocol tool
/// list or as a JSON schema in a structured request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

/// A single named argument of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// JSON schema primitive: "string", "number", "integer", "boolean"
    pub param_type: String,
    /// Closed set of accepted string values, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// First required parameter, used to map a free-text action input
    /// onto a structured argument.
    pub fn primary_parameter(&self) -> Option<&ToolParameter> {
        self.parameters
            .iter()
            .find(|p| p.required)
            .or_else(|| self.parameters.first())
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            allowed_values: Vec::new(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// A tool invocation requested by the model through structured calls.
///
/// `raw_arguments` is kept exactly as the provider sent it; decoding happens
/// per call so a malformed payload only fails that call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Provider-assigned identifier correlating the call with its result turn.
    pub id: String,
    pub name: String,
    pub raw_arguments: String,
}

impl ToolCallRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        raw_arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            raw_arguments: raw_arguments.into(),
        }
    }

    /// Decode the raw payload into a JSON object.
    ///
    /// An empty or whitespace-only payload decodes to an empty object.
    pub fn decode_arguments(&self) -> Result<ToolArguments, String> {
        let raw = self.raw_arguments.trim();
        if raw.is_empty() {
            return Ok(ToolArguments::Structured(serde_json::Value::Object(
                serde_json::Map::new(),
            )));
        }

        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value @ serde_json::Value::Object(_)) => Ok(ToolArguments::Structured(value)),
            Ok(other) => Err(format!(
                "Arguments for tool '{}' must be a JSON object, got {}",
                self.name,
                json_kind(&other)
            )),
            Err(e) => Err(format!(
                "Arguments for tool '{}' are not valid JSON: {}",
                self.name, e
            )),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Audit entry for one executed tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecutionRecord {
    pub tool_name: String,
    pub arguments: String,
    pub result: String,
}

impl ToolExecutionRecord {
    pub fn new(
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: arguments.into(),
            result: result.into(),
        }
    }
}
