//! Application-level configuration.
//!
//! - [`LoopParams`]: loop control (model, iteration budget, self-check, timeouts)

pub mod loop_params;

pub use loop_params::LoopParams;
