//! Tool Executor port
//!
//! Defines the interface the loops use to list and execute tools.

use async_trait::async_trait;
use toolloop_domain::{ToolArguments, ToolSpec};

/// Port for tool execution
///
/// `execute` is total: unknown tools and failing tools come back as an
/// `{"error": ...}` payload, never as a Rust error. Implementations must
/// support concurrent calls from several running loops.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Specs of all tools, in registration order.
    fn specs(&self) -> &[ToolSpec];

    /// Get the spec of a specific tool
    fn spec(&self, name: &str) -> Option<&ToolSpec> {
        self.specs().iter().find(|s| s.name == name)
    }

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.spec(name).is_some()
    }

    /// Get names of all available tools
    fn tool_names(&self) -> Vec<&str> {
        self.specs().iter().map(|s| s.name.as_str()).collect()
    }

    /// Execute a tool and return the observation text.
    async fn execute(&self, name: &str, args: &ToolArguments) -> String;
}
