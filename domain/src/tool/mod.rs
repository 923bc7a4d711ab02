//! Tool domain module
//!
//! Defines what a tool *is* to the agent loops, independent of how tools
//! are stored or executed.
//!
//! ```text
//! ┌──────────────┐    ┌─────────────────┐    ┌──────────────────────┐
//! │ ToolSpec     │───▶│ ToolArguments   │───▶│ String / ToolError   │
//! │ (declared)   │    │ (Text | JSON)   │    │ (observation)        │
//! └──────────────┘    └─────────────────┘    └──────────────────────┘
//! ```
//!
//! - [`ToolSpec`]: name, description and parameters shown to the model
//! - [`ToolArguments`]: free text from the text protocol, or a JSON object
//!   decoded from a [`ToolCallRequest`]
//! - [`Tool`]: the capability trait implemented by every tool
//! - [`ToolValidator`]: schema check for structured arguments
//! - [`ToolExecutionRecord`]: audit record of one executed call
//!
//! Storage and execution live in the infrastructure layer's `ToolRegistry`,
//! behind the application layer's `ToolExecutorPort`.

pub mod arguments;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::ToolArguments;
pub use entities::{ToolCallRequest, ToolExecutionRecord, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, Tool, ToolValidator};
pub use value_objects::{ToolError, error_payload};
