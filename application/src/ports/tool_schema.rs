//! Tool schema conversion port.
//!
//! Separates "which tools to offer" (domain [`ToolSpec`]s in registration
//! order) from "how to serialize them for the API" (infrastructure).

use toolloop_domain::ToolSpec;

/// Port for converting tool specs to the provider's function format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool spec to a JSON schema entry.
    fn tool_to_schema(&self, tool: &ToolSpec) -> serde_json::Value;

    /// Convert tool specs, preserving their order.
    fn tools_schema(&self, tools: &[ToolSpec]) -> Vec<serde_json::Value> {
        tools.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
