//! Use cases (application services)
//!
//! - [`run_react`]: text-protocol loop with optional self-verification
//! - [`run_tool_calling`]: structured function-calling loop
//! - [`verify_answer`]: the self-check completion used by the text loop

pub mod run_react;
pub mod run_tool_calling;
pub(crate) mod shared;
pub(crate) mod tool_helpers;
pub mod types;
pub mod verify_answer;

#[cfg(test)]
pub(crate) mod test_support;
