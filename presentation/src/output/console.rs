//! Console output formatter for loop results

use colored::Colorize;
use toolloop_domain::{ConfigIssue, LoopOutcome, LoopResult, OutputFormat, Severity, ToolSpec};

/// Formats loop results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn render(result: &LoopResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::format_answer(result),
            OutputFormat::Full => Self::format_full(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Only the final answer; non-answers are marked so they are not
    /// mistaken for one.
    pub fn format_answer(result: &LoopResult) -> String {
        match result.outcome {
            LoopOutcome::Answered => format!("{}\n", result.final_answer),
            _ => format!("{}\n", result.final_answer.yellow()),
        }
    }

    /// Format the complete result
    pub fn format_full(result: &LoopResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Loop Result"));
        output.push('\n');

        let outcome = match result.outcome {
            LoopOutcome::Answered => result.outcome.as_str().green().bold(),
            LoopOutcome::BudgetExhausted => result.outcome.as_str().yellow().bold(),
            LoopOutcome::Cancelled => result.outcome.as_str().red().bold(),
        };
        output.push_str(&format!("{} {}\n", "Outcome:".cyan().bold(), outcome));
        output.push_str(&format!(
            "{} {}\n",
            "Iterations:".cyan().bold(),
            result.iterations
        ));

        if !result.tool_executions.is_empty() {
            output.push_str(&Self::section_header("Tool Executions"));
            for (i, record) in result.tool_executions.iter().enumerate() {
                output.push_str(&format!(
                    "{} {}({})\n    {}\n",
                    format!("{}.", i + 1).dimmed(),
                    record.tool_name.yellow(),
                    record.arguments,
                    record.result
                ));
            }
        }

        if !result.trace.is_empty() {
            output.push_str(&Self::section_header("Trace"));
            output.push_str(result.trace.trim_end());
            output.push('\n');
        }

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&result.final_answer);
        output.push('\n');
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &LoopResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// List registered tools with their parameters
    pub fn format_tools(specs: &[ToolSpec]) -> String {
        if specs.is_empty() {
            return format!("{}\n", "No tools registered.".yellow());
        }

        let mut output = format!("{}\n", "Available tools:".cyan().bold());
        for spec in specs {
            output.push_str(&format!("\n  {}  {}\n", spec.name.bold(), spec.description));
            for param in &spec.parameters {
                let required = if param.required { "required" } else { "optional" };
                let mut line = format!(
                    "      - {} ({}, {}): {}",
                    param.name, param.param_type, required, param.description
                );
                if !param.allowed_values.is_empty() {
                    line.push_str(&format!(" [{}]", param.allowed_values.join(" | ")));
                }
                output.push_str(&line.dimmed().to_string());
                output.push('\n');
            }
        }
        output
    }

    /// Render configuration issues, one per line
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}\n", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}\n", "warning:".yellow().bold(), issue.message),
            })
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolloop_domain::{ConfigIssueCode, ToolExecutionRecord, ToolParameter};

    fn answered() -> LoopResult {
        LoopResult::answered(
            "120",
            2,
            "Action: calculate\nAction Input: (15+25)*3\nObservation: 120\nFinal Answer: 120"
                .to_string(),
        )
        .with_tool_executions(vec![ToolExecutionRecord::new(
            "calculate",
            "(15+25)*3",
            "120",
        )])
    }

    #[test]
    fn test_answer_format_is_just_the_answer() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::format_answer(&answered()), "120\n");
    }

    #[test]
    fn test_full_format_lists_executions_and_trace() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_full(&answered());
        assert!(output.contains("Outcome: answered"));
        assert!(output.contains("Iterations: 2"));
        assert!(output.contains("1. calculate((15+25)*3)"));
        assert!(output.contains("Observation: 120"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let json = ConsoleFormatter::format_json(&answered());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "answered");
        assert_eq!(value["tool_executions"][0]["tool_name"], "calculate");
    }

    #[test]
    fn test_format_tools_shows_allowed_values() {
        colored::control::set_override(false);
        let specs = vec![
            ToolSpec::new("get_weather", "Weather lookup").with_parameter(
                ToolParameter::new("unit", "Unit", false)
                    .with_allowed_values(["celsius", "fahrenheit"]),
            ),
        ];
        let output = ConsoleFormatter::format_tools(&specs);
        assert!(output.contains("get_weather"));
        assert!(output.contains("unit (string, optional): Unit [celsius | fahrenheit]"));
    }

    #[test]
    fn test_format_issues() {
        colored::control::set_override(false);
        let issues = vec![ConfigIssue::warning(
            ConfigIssueCode::UnknownTool,
            "tools.enabled: unknown tool 'x', skipping",
        )];
        assert_eq!(
            ConsoleFormatter::format_issues(&issues),
            "warning: tools.enabled: unknown tool 'x', skipping\n"
        );
    }
}
