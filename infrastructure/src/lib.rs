//! Infrastructure layer for toolloop
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the tool registry and builtin tools, the
//! HTTP completion gateway, the JSONL transcript, and configuration loading.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig,
    FileProviderConfig, FileToolsConfig, ResolvedConfig,
};
pub use gateway::OpenAiCompatibleGateway;
pub use logging::JsonlConversationLogger;
pub use tools::{
    BuiltinTool, JsonSchemaToolConverter, ToolRegistry, builtin_registry, default_registry,
};
