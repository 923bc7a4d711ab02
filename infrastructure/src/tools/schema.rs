//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the OpenAI
//! function-calling format used by chat completions APIs.

use serde_json::{Map, Value, json};
use toolloop_application::ports::tool_schema::ToolSchemaPort;
use toolloop_domain::ToolSpec;

/// Default implementation producing `{"type": "function", "function": {...}}` entries.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolSpec) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type));
            prop.insert("description".to_string(), json!(param.description));
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), json!(param.allowed_values));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolloop_domain::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolSpec::new("get_weather", "Get the weather")
            .with_parameter(ToolParameter::new("city", "City name", true))
            .with_parameter(
                ToolParameter::new("unit", "Temperature unit", false)
                    .with_allowed_values(["celsius", "fahrenheit"]),
            )
            .with_parameter(ToolParameter::new("days", "Forecast days", false).with_type("integer"));

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "get_weather");
        assert_eq!(schema["function"]["description"], "Get the weather");

        let params = &schema["function"]["parameters"];
        assert_eq!(params["type"], "object");
        assert_eq!(params["properties"]["city"]["type"], "string");
        assert_eq!(params["properties"]["days"]["type"], "integer");
        assert_eq!(
            params["properties"]["unit"]["enum"],
            json!(["celsius", "fahrenheit"])
        );
        assert!(params["properties"]["city"].get("enum").is_none());
        assert_eq!(params["required"], json!(["city"]));
    }

    #[test]
    fn test_tools_schema_keeps_order() {
        let converter = JsonSchemaToolConverter;
        let tools = vec![
            ToolSpec::new("web_search", "Search"),
            ToolSpec::new("calculate", "Math"),
        ];

        let schemas = converter.tools_schema(&tools);
        let names: Vec<_> = schemas
            .iter()
            .map(|s| s["function"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["web_search", "calculate"]);
    }
}
