//! Tool domain traits
//!
//! [`Tool`] is the capability interface every registered tool implements.
//! [`ToolValidator`] is pure domain logic that checks structured arguments
//! against a [`ToolSpec`] before the tool runs.

use super::arguments::ToolArguments;
use super::entities::{ToolParameter, ToolSpec};
use super::value_objects::ToolError;
use async_trait::async_trait;

/// A named capability the model can invoke.
///
/// Implementations must be shareable across concurrently running loops;
/// `execute` takes `&self` and any internal state is the tool's own concern.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Declaration shown to the model.
    fn spec(&self) -> ToolSpec;

    /// Run the tool. The returned text (or the error's payload) becomes the
    /// observation for this call.
    async fn execute(&self, args: &ToolArguments) -> Result<String, ToolError>;
}

/// Validator for structured tool arguments
pub trait ToolValidator {
    /// Validate arguments against the tool's declaration
    fn validate(&self, args: &ToolArguments, spec: &ToolSpec) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Free-text arguments are accepted as-is: the text protocol has no schema
/// and each tool interprets its input line itself.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, args: &ToolArguments, spec: &ToolSpec) -> Result<(), ToolError> {
        let object = match args {
            ToolArguments::Text(_) => return Ok(()),
            ToolArguments::Structured(serde_json::Value::Object(map)) => map,
            ToolArguments::Structured(_) => {
                return Err(ToolError::invalid_argument(format!(
                    "Arguments for tool '{}' must be a JSON object",
                    spec.name
                )));
            }
        };

        // Check that all required parameters are present
        for param in &spec.parameters {
            if param.required && object.get(&param.name).is_none_or(|v| v.is_null()) {
                return Err(ToolError::invalid_argument(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, spec.name
                )));
            }
        }

        for (arg_name, value) in object {
            let Some(param) = spec.parameter(arg_name) else {
                return Err(ToolError::invalid_argument(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, spec.name
                )));
            };

            if value.is_null() {
                continue;
            }

            check_type(param, value, &spec.name)?;
        }

        Ok(())
    }
}

fn check_type(
    param: &ToolParameter,
    value: &serde_json::Value,
    tool: &str,
) -> Result<(), ToolError> {
    let matches = match param.param_type.as_str() {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        _ => true,
    };

    if !matches {
        return Err(ToolError::invalid_argument(format!(
            "Parameter '{}' for tool '{}' must be of type {}",
            param.name, tool, param.param_type
        )));
    }

    if !param.allowed_values.is_empty() {
        let accepted = value
            .as_str()
            .is_some_and(|s| param.allowed_values.iter().any(|a| a == s));
        if !accepted {
            return Err(ToolError::invalid_argument(format!(
                "Parameter '{}' for tool '{}' must be one of: {}",
                param.name,
                tool,
                param.allowed_values.join(", ")
            )));
        }
    }

    Ok(())
}
