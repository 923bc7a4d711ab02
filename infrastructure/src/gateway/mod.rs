//! Completion gateway adapters

mod openai;
pub mod wire;

pub use openai::OpenAiCompatibleGateway;
