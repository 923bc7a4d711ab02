//! Tool domain value objects
//!
//! A tool never fails the loop. Whatever goes wrong inside it is reported
//! back to the model as an error payload built from [`ToolError`].

use serde::{Deserialize, Serialize};

/// Error produced by a tool or by argument handling before it runs.
///
/// | Code | Description |
/// |------|-------------|
/// | `NOT_FOUND` | Unknown tool or unknown lookup key (e.g. a city) |
/// | `INVALID_ARGUMENT` | Missing, unknown or mistyped parameters |
/// | `EXECUTION_FAILED` | Runtime failure inside the tool |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    /// Render as the `{"error": "..."}` observation the model receives.
    pub fn to_payload(&self) -> String {
        error_payload(&self.message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Build an `{"error": message}` JSON payload.
pub fn error_payload(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
