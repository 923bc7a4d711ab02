//! Prompt templates for the agent loops

use crate::tool::ToolSpec;

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// Stop sequence that keeps the model from writing its own observations.
    pub const OBSERVATION_STOP: &'static str = "Observation:";

    /// Substring the verifier must reply with to accept an answer.
    pub const VERIFIED_TOKEN: &'static str = "VERIFIED";

    /// Appended when an output contained neither an action nor an answer.
    pub const CONTINUATION_CUE: &'static str = "Thought: ";

    /// Appended when the verifier rejects a candidate answer.
    pub const CORRECTIVE_THOUGHT: &'static str =
        "Thought: The previous answer may be incorrect. I need to keep investigating.";

    /// System prompt for the text protocol, listing tools in the given order.
    pub fn react_system(tools: &[ToolSpec]) -> String {
        let tool_descriptions = tools
            .iter()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are an assistant that solves problems by using tools.

Available tools:
{tool_descriptions}

Use exactly this format:

Thought: think about what to do next
Action: the tool to use, one of the names above
Action Input: the input for the tool, on a single line
Observation: the tool result
... (Thought / Action / Action Input / Observation can repeat)
Thought: I now know the final answer
Final Answer: the final answer, on a single line

Never write an Observation yourself; it is provided after each Action."#
        )
    }

    /// First user turn of a text-protocol run.
    pub fn react_question(question: &str) -> String {
        format!("Question: {question}\n\nLet's begin.")
    }

    pub fn observation(result: &str) -> String {
        format!("Observation: {result}")
    }

    pub fn unknown_tool(name: &str) -> String {
        format!("Tool '{name}' does not exist")
    }

    /// Prompt for the self-verification completion.
    pub fn verification(question: &str, answer: &str) -> String {
        format!(
            r#"Check whether the following answer correctly answers the question.

Question: {question}
Answer: {answer}

Consider:
1. Does the answer address the question directly?
2. Are the facts in it plausible?
3. Does it contain obvious mistakes or contradictions?

If the answer is correct, reply: VERIFIED
If the answer may be wrong, reply: INVALID followed by the reason"#
        )
    }

    /// System prompt for the structured-call loop.
    pub fn tool_calling_system() -> String {
        r#"You are an assistant that can use tools.
Choose the tools that help answer the user's question, then give a complete answer.
You may chain several tools when needed."#
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_react_system_lists_tools_in_order() {
        let tools = vec![
            ToolSpec::new("search", "Search the web"),
            ToolSpec::new("calculate", "Evaluate arithmetic"),
        ];
        let prompt = AgentPromptTemplate::react_system(&tools);

        let search = prompt.find("- search: Search the web").unwrap();
        let calculate = prompt.find("- calculate: Evaluate arithmetic").unwrap();
        assert!(search < calculate);
        assert!(prompt.contains("Final Answer:"));
        assert!(prompt.contains("Action Input:"));
    }

    #[test]
    fn test_verification_prompt_contains_question_and_answer() {
        let prompt = AgentPromptTemplate::verification("What is 2+2?", "4");
        assert!(prompt.contains("Question: What is 2+2?"));
        assert!(prompt.contains("Answer: 4"));
        assert!(prompt.contains(AgentPromptTemplate::VERIFIED_TOKEN));
    }

    #[test]
    fn test_unknown_tool_names_the_tool() {
        let text = AgentPromptTemplate::observation(&AgentPromptTemplate::unknown_tool("teleport"));
        assert_eq!(text, "Observation: Tool 'teleport' does not exist");
    }
}
