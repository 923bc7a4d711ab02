//! Progress reporting for loop runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use toolloop_application::LoopProgressNotifier;
use toolloop_domain::{LoopMode, LoopOutcome, LoopResult};

const PREVIEW_LEN: usize = 80;

fn preview(text: &str) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if line.chars().count() > PREVIEW_LEN {
        let cut: String = line.chars().take(PREVIEW_LEN).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

/// Spinner-based progress on stderr
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: false,
        }
    }

    /// Also print each model output and tool result above the spinner
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::new()
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopProgressNotifier for ProgressReporter {
    fn on_loop_start(&self, mode: LoopMode, _question: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(mode.as_str().to_string());
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(pb);
        }
    }

    fn on_iteration_start(&self, iteration: usize, max_iterations: usize) {
        self.with_spinner(|pb| {
            pb.set_message(format!("Iteration {}/{}: thinking...", iteration, max_iterations));
        });
    }

    fn on_model_output(&self, text: &str) {
        if self.verbose {
            self.with_spinner(|pb| pb.println(format!("  {}", preview(text).dimmed())));
        }
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        self.with_spinner(|pb| pb.set_message(format!("Running {}({})", tool_name.yellow(), args)));
    }

    fn on_tool_result(&self, tool_name: &str, result: &str) {
        if self.verbose {
            self.with_spinner(|pb| {
                pb.println(format!("  {} {} -> {}", "v".green(), tool_name, preview(result)));
            });
        }
    }

    fn on_stuck(&self, iteration: usize) {
        if self.verbose {
            self.with_spinner(|pb| {
                pb.println(format!(
                    "  {} iteration {}: no action or answer",
                    "?".yellow(),
                    iteration
                ));
            });
        }
    }

    fn on_verification(&self, _answer: &str, accepted: bool) {
        self.with_spinner(|pb| {
            if accepted {
                pb.println(format!("  {} answer verified", "v".green()));
            } else {
                pb.println(format!("  {} answer rejected, continuing", "x".red()));
            }
        });
    }

    fn on_finish(&self, _result: &LoopResult) {
        self.finish();
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl LoopProgressNotifier for SimpleProgress {
    fn on_loop_start(&self, mode: LoopMode, question: &str) {
        eprintln!("{} {} {}", "->".cyan(), mode.as_str().bold(), preview(question));
    }

    fn on_iteration_start(&self, iteration: usize, max_iterations: usize) {
        eprintln!("  iteration {}/{}", iteration, max_iterations);
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        eprintln!("  {} {}({})", "*".yellow(), tool_name, args);
    }

    fn on_verification(&self, _answer: &str, accepted: bool) {
        if accepted {
            eprintln!("  {} answer verified", "v".green());
        } else {
            eprintln!("  {} answer rejected", "x".red());
        }
    }

    fn on_finish(&self, result: &LoopResult) {
        let outcome = match result.outcome {
            LoopOutcome::Answered => result.outcome.as_str().green(),
            _ => result.outcome.as_str().yellow(),
        };
        eprintln!("{} {} after {} iterations", "<-".cyan(), outcome, result.iterations);
    }
}
