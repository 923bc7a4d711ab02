//! Application layer for toolloop
//!
//! This crate contains the two agent loops, the self-verification step,
//! port definitions, and loop configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::LoopParams;
pub use ports::{
    completion_gateway::{CompletionGateway, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    loop_progress::{LoopProgressNotifier, NoLoopProgress},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::run_react::RunReactUseCase;
pub use use_cases::run_tool_calling::RunToolCallingUseCase;
pub use use_cases::types::{AgentLoopError, LoopInput};
pub use use_cases::verify_answer::{Verdict, VerifyAnswerUseCase};
