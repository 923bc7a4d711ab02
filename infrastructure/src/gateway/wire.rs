//! Chat completions wire format
//!
//! Request and response bodies of `POST /chat/completions`, plus the pure
//! mapping between them and the domain types.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use toolloop_application::ports::completion_gateway::GatewayError;
use toolloop_application::ports::tool_schema::ToolSchemaPort;
use toolloop_domain::{
    Completion, CompletionOptions, Conversation, StopReason, ToolCallRequest, ToolChoice, Turn,
};

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: WireFunction,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<WireToolCall>,
}

fn to_wire_message(turn: &Turn) -> WireMessage {
    WireMessage {
        role: turn.role.as_str(),
        content: turn.content.clone(),
        tool_calls: turn
            .tool_calls
            .iter()
            .map(|call| WireToolCall {
                id: call.id.clone(),
                kind: function_kind(),
                function: WireFunction {
                    name: call.name.clone(),
                    arguments: call.raw_arguments.clone(),
                },
            })
            .collect(),
        tool_call_id: turn.tool_call_id.clone(),
        name: turn.tool_name.clone(),
    }
}

fn tool_choice_value(choice: &ToolChoice) -> Value {
    match choice {
        ToolChoice::Auto => json!("auto"),
        ToolChoice::None => json!("none"),
        ToolChoice::Specific(name) => json!({
            "type": "function",
            "function": { "name": name }
        }),
    }
}

/// Build the request body for one completion call.
pub fn build_request(
    conversation: &Conversation,
    options: &CompletionOptions,
    schema: &dyn ToolSchemaPort,
) -> ChatRequest {
    let (tools, tool_choice) = if options.has_tools() {
        (
            Some(schema.tools_schema(&options.tools)),
            Some(tool_choice_value(&options.tool_choice)),
        )
    } else {
        (None, None)
    };

    ChatRequest {
        model: options.model.as_str().to_string(),
        messages: conversation.turns().iter().map(to_wire_message).collect(),
        temperature: options.temperature,
        stop: options.stop.clone(),
        tools,
        tool_choice,
    }
}

/// Map a decoded response body to a [`Completion`].
pub fn parse_response(response: ChatResponse) -> Result<Completion, GatewayError> {
    let model = response.model;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

    let tool_calls = choice
        .message
        .tool_calls
        .into_iter()
        .map(|call| ToolCallRequest::new(call.id, call.function.name, call.function.arguments))
        .collect();

    Ok(Completion {
        text: choice.message.content,
        tool_calls,
        stop_reason: choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason),
        model,
    })
}

/// Decode a raw response body.
pub fn decode_body(body: &str) -> Result<Completion, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("undecodable body: {}", e)))?;
    parse_response(response)
}

/// Map a non-success HTTP status to a gateway error.
pub fn status_error(status: u16, body: String) -> GatewayError {
    match status {
        401 | 403 => GatewayError::Authentication(if body.is_empty() {
            format!("status {}", status)
        } else {
            body
        }),
        _ => GatewayError::RequestFailed { status, body },
    }
}
