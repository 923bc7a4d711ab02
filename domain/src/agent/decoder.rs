//! Action decoder for the text protocol
//!
//! The model is prompted to answer in a fixed grammar:
//!
//! ```text
//! Thought: I need to compute this.
//! Action: calculate
//! Action Input: (15 + 25) * 3
//! ```
//!
//! or, once it knows the answer:
//!
//! ```text
//! Final Answer: 120
//! ```
//!
//! Decoding is purely textual. Finding nothing is a valid outcome
//! ([`Decision::Stuck`]), never an error.

use regex::Regex;
use std::sync::LazyLock;

static FINAL_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Final Answer:\s*(.+?)(?:\n|$)").expect("final answer pattern is valid")
});
static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Action:\s*(\w+)").expect("action pattern is valid"));
static ACTION_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action Input:\s*(.+?)(?:\n|$)").expect("action input pattern is valid")
});

/// What one model output asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A candidate final answer.
    FinalAnswer(String),
    /// Invoke `tool` with the free-text `input`.
    Act { tool: String, input: String },
    /// Neither a final answer nor a complete action was found.
    Stuck,
}

/// Turns raw model text into a [`Decision`].
///
/// The loop depends only on this trait, so the grammar can be replaced
/// (e.g. by a stricter structured-output decoder) without touching it.
pub trait ActionDecoder: Send + Sync {
    fn decode(&self, output: &str) -> Decision;
}

/// Decoder for the `Thought / Action / Action Input / Final Answer` grammar.
///
/// - `Action:` is followed by a bare identifier.
/// - `Action Input:` and `Final Answer:` take the rest of the line, trimmed.
/// - A final answer wins over an action in the same output. A marker
///   followed only by blanks still counts, with an empty value.
/// - An action without input (or input without action) is [`Decision::Stuck`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactGrammarDecoder;

impl ReactGrammarDecoder {
    fn capture(re: &Regex, text: &str) -> Option<String> {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

impl ActionDecoder for ReactGrammarDecoder {
    fn decode(&self, output: &str) -> Decision {
        if let Some(answer) = Self::capture(&FINAL_ANSWER, output) {
            return Decision::FinalAnswer(answer);
        }

        match (
            Self::capture(&ACTION, output),
            Self::capture(&ACTION_INPUT, output),
        ) {
            (Some(tool), Some(input)) => Decision::Act { tool, input },
            _ => Decision::Stuck,
        }
    }
}
