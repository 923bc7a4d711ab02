//! Prompt templates for the agent loops

pub mod agent;

pub use agent::AgentPromptTemplate;
