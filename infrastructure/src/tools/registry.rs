//! Tool Registry
//!
//! Holds the tools one run can use, in the order they were registered.
//!
//! # Name collisions
//!
//! The first registration of a name wins. Later tools with the same name are
//! dropped and logged, so the set of names the model sees never changes
//! underneath a running loop.
//!
//! # Failure containment
//!
//! [`ToolRegistry::execute`] never fails: unknown tools, tool errors and
//! panics all come back as `{"error": ...}` payloads.

use async_trait::async_trait;
use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use toolloop_application::ports::tool_executor::ToolExecutorPort;
use toolloop_domain::{Tool, ToolArguments, ToolSpec, error_payload};
use tracing::{debug, warn};

/// Registry of named tools.
///
/// Registration takes `&mut self`; execution takes `&self`, so a registry
/// shared through an `Arc` is frozen for as long as loops are using it.
#[derive(Default)]
pub struct ToolRegistry {
    specs: Vec<ToolSpec>,
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool (builder pattern)
    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.register(Arc::new(tool));
        self
    }

    /// Register a tool.
    ///
    /// Returns `false` when a tool with the same name is already registered;
    /// the new tool is discarded in that case.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> bool {
        let spec = tool.spec();

        if self.index.contains_key(&spec.name) {
            warn!(tool = %spec.name, "Tool name already registered, keeping the first one");
            return false;
        }

        debug!(tool = %spec.name, "Registered tool");
        self.index.insert(spec.name.clone(), self.tools.len());
        self.specs.push(spec);
        self.tools.push(tool);
        true
    }

    /// Look up a tool by name
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    /// Specs of all tools, in registration order.
    pub fn list_specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn specs(&self) -> &[ToolSpec] {
        self.list_specs()
    }

    fn spec(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&i| &self.specs[i])
    }

    async fn execute(&self, name: &str, args: &ToolArguments) -> String {
        let Some(tool) = self.resolve(name) else {
            return error_payload(&format!("Tool '{}' does not exist", name));
        };

        match AssertUnwindSafe(tool.execute(args)).catch_unwind().await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!(tool = %name, error = %e, "Tool returned an error");
                e.to_payload()
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                warn!(tool = %name, reason = %reason, "Tool panicked");
                error_payload(&format!("Tool '{}' panicked: {}", name, reason))
            }
        }
    }
}
