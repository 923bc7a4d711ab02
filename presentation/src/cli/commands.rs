//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use toolloop_domain::{LoopMode, Provider};

/// Output format for loop results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    #[default]
    Answer,
    /// Answer, outcome, tool executions and the full trace
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for toolloop_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => toolloop_domain::OutputFormat::Answer,
            OutputFormat::Full => toolloop_domain::OutputFormat::Full,
            OutputFormat::Json => toolloop_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for toolloop
#[derive(Parser, Debug)]
#[command(name = "toolloop")]
#[command(author, version, about = "Answer questions with a tool-using model loop")]
#[command(long_about = r#"
toolloop answers a question by letting a model call tools in a loop.

Two loop modes are available:
  react         Text protocol (Thought / Action / Action Input / Final Answer),
                with optional self-verification of the final answer
  tool-calling  Native function calling with JSON tool schemas

Configuration files are loaded from (in priority order):
1. TOOLLOOP_* environment variables (e.g. TOOLLOOP_AGENT__MAX_ITERATIONS=3)
2. --config <path>        Explicit config file
3. ./toolloop.toml        Project-level config
4. ~/.config/toolloop/config.toml   Global config

Example:
  toolloop "What is (15 + 25) * 3?"
  toolloop --mode tool-calling "What's the weather in Paris in fahrenheit?"
  toolloop --tool calculate --args '{"expression": "2 ^ 10"}'
"#)]
pub struct Cli {
    /// The question to answer
    pub question: Option<String>,

    /// Loop mode (react, tool-calling)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<LoopMode>,

    /// Maximum number of iterations
    #[arg(short = 'n', long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Accept the first final answer without self-verification
    #[arg(long)]
    pub no_self_check: bool,

    /// Model to address completion requests to
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Completion provider (deepseek, openai, anthropic)
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<Provider>,

    /// Execute the tool calls of one iteration concurrently
    #[arg(long)]
    pub parallel_tools: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "answer")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the resolved settings, then exit
    #[arg(long)]
    pub show_config: bool,

    /// List the registered tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Execute a single tool directly and print its result
    #[arg(long, value_name = "NAME", requires = "args")]
    pub tool: Option<String>,

    /// Arguments for --tool: a JSON object, or free text
    #[arg(long, value_name = "JSON")]
    pub args: Option<String>,
}
