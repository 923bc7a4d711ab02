//! Tool implementations and the registry the loops execute through
//!
//! - `builtin`: sample-data tools (calculate, get_weather, web_search, get_datetime)
//! - `registry`: ordered, first-wins [`ToolRegistry`]
//! - `schema`: OpenAI function-format conversion of tool specs

pub mod builtin;

mod registry;
mod schema;

pub use builtin::BuiltinTool;
pub use registry::ToolRegistry;
pub use schema::JsonSchemaToolConverter;

/// Build a registry holding the given built-in tools, in the given order.
pub fn builtin_registry(tools: &[BuiltinTool]) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool.instantiate());
    }
    registry
}

/// Registry with every built-in tool.
pub fn default_registry() -> ToolRegistry {
    builtin_registry(BuiltinTool::all())
}
