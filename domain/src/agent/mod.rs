//! Agent loop domain
//!
//! Pure pieces of the tool-use loop that need no I/O:
//!
//! - [`decoder`]: the text-protocol grammar behind the [`ActionDecoder`] trait
//! - [`budget`]: the positive iteration ceiling
//! - [`result`]: what a finished run hands back to its caller
//!
//! The loops themselves live in the application layer.

pub mod budget;
pub mod decoder;
pub mod result;

pub use budget::IterationBudget;
pub use decoder::{ActionDecoder, Decision, ReactGrammarDecoder};
pub use result::{LoopOutcome, LoopResult};
