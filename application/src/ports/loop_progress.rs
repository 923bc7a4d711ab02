//! Loop progress port.
//!
//! [`LoopProgressNotifier`] is an **output port** that the presentation layer
//! implements to display a run as it happens. Every method has a no-op
//! default, so implementers only override what they display.

use toolloop_domain::{LoopMode, LoopResult};

/// Progress notifier for loop runs.
pub trait LoopProgressNotifier: Send + Sync {
    /// Called once before the first iteration
    fn on_loop_start(&self, _mode: LoopMode, _question: &str) {}

    /// Called at the start of each iteration (1-based)
    fn on_iteration_start(&self, _iteration: usize, _max_iterations: usize) {}

    /// Called with the text body of each model completion
    fn on_model_output(&self, _text: &str) {}

    /// Called when a tool is invoked
    fn on_tool_call(&self, _tool_name: &str, _args: &str) {}

    /// Called when a tool returns its observation
    fn on_tool_result(&self, _tool_name: &str, _result: &str) {}

    /// Called when an output contained neither an action nor an answer
    fn on_stuck(&self, _iteration: usize) {}

    /// Called after the self-check verdict on a candidate answer
    fn on_verification(&self, _answer: &str, _accepted: bool) {}

    /// Called once with the result of the run
    fn on_finish(&self, _result: &LoopResult) {}
}

/// No-op progress notifier
pub struct NoLoopProgress;

impl LoopProgressNotifier for NoLoopProgress {}
