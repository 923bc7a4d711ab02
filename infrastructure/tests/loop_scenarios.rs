//! End-to-end loop scenarios against the real registry and builtin tools.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use toolloop_application::{
    CompletionGateway, GatewayError, LoopInput, LoopParams, RunReactUseCase,
    RunToolCallingUseCase, ToolExecutorPort,
};
use toolloop_domain::{
    Completion, CompletionOptions, Conversation, IterationBudget, LoopOutcome, Role,
    ToolCallRequest,
};
use toolloop_infrastructure::{BuiltinTool, JsonlConversationLogger, builtin_registry, default_registry};

struct ScriptedGateway {
    replies: Mutex<VecDeque<Completion>>,
    seen: Mutex<Vec<Conversation>>,
}

impl ScriptedGateway {
    fn new(replies: Vec<Completion>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn text(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Completion::from_text(*r)).collect())
    }

    fn last_conversation(&self) -> Conversation {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(
        &self,
        conversation: &Conversation,
        _options: &CompletionOptions,
    ) -> Result<Completion, GatewayError> {
        self.seen.lock().unwrap().push(conversation.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::Other("script exhausted".to_string()))
    }
}

fn params() -> LoopParams {
    LoopParams::default().with_self_check(false)
}

#[tokio::test]
async fn react_loop_calculates_with_builtin_tool() {
    let gateway = Arc::new(ScriptedGateway::text(&[
        "Thought: I should compute it.\nAction: calculate\nAction Input: (15 + 25) * 3",
        "Thought: I know the answer.\nFinal Answer: 120",
    ]));
    let registry = Arc::new(default_registry());

    let result = RunReactUseCase::new(gateway.clone(), registry)
        .execute(LoopInput::new("What is (15 + 25) * 3?", params()))
        .await
        .unwrap();

    assert_eq!(result.outcome, LoopOutcome::Answered);
    assert_eq!(result.final_answer, "120");
    assert_eq!(result.iterations, 2);
    assert_eq!(result.tool_executions.len(), 1);
    assert_eq!(result.tool_executions[0].result, "120");

    let conversation = gateway.last_conversation();
    let observation = conversation.last().unwrap();
    assert_eq!(observation.role, Role::User);
    assert_eq!(observation.content_str(), "Observation: 120");
}

#[tokio::test]
async fn react_loop_reports_unknown_city_as_observation() {
    let gateway = Arc::new(ScriptedGateway::text(&[
        "Action: get_weather\nAction Input: Atlantis",
        "Final Answer: I could not find weather for Atlantis.",
    ]));
    let registry = Arc::new(builtin_registry(&[BuiltinTool::GetWeather]));

    let result = RunReactUseCase::new(gateway.clone(), registry)
        .execute(LoopInput::new("Weather in Atlantis?", params()))
        .await
        .unwrap();

    assert!(result.is_answered());
    let observation = &result.tool_executions[0].result;
    let payload: Value = serde_json::from_str(observation).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn react_loop_exhausts_budget_without_answer() {
    let gateway = Arc::new(ScriptedGateway::text(&[
        "Thought: hmm",
        "Thought: still thinking",
    ]));
    let registry = Arc::new(default_registry());
    let params = params().with_budget(IterationBudget::new(2).unwrap());

    let result = RunReactUseCase::new(gateway, registry)
        .execute(LoopInput::new("Anything?", params))
        .await
        .unwrap();

    assert_eq!(result.outcome, LoopOutcome::BudgetExhausted);
    assert_eq!(result.iterations, 2);
}

#[tokio::test]
async fn tool_calling_loop_runs_weather_and_answers() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Completion::with_tool_calls(
            None,
            vec![ToolCallRequest::new(
                "call_1",
                "get_weather",
                r#"{"city": "Paris", "unit": "celsius"}"#,
            )],
        ),
        Completion::from_text("It is sunny in Paris, 18°C."),
    ]));
    let registry = Arc::new(default_registry());

    let result = RunToolCallingUseCase::new(gateway.clone(), registry)
        .execute(LoopInput::new("Weather in Paris?", params()))
        .await
        .unwrap();

    assert_eq!(result.final_answer, "It is sunny in Paris, 18°C.");
    assert_eq!(result.iterations, 2);

    let conversation = gateway.last_conversation();
    let tool_turn = conversation.last().unwrap();
    assert_eq!(tool_turn.role, Role::Tool);
    assert_eq!(tool_turn.tool_call_id.as_deref(), Some("call_1"));
    let payload: Value = serde_json::from_str(tool_turn.content_str()).unwrap();
    assert_eq!(payload["temperature"], "18°C");
}

#[tokio::test]
async fn tool_calling_loop_rejects_invalid_enum_before_execution() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Completion::with_tool_calls(
            None,
            vec![ToolCallRequest::new(
                "call_1",
                "get_weather",
                r#"{"city": "Paris", "unit": "kelvin"}"#,
            )],
        ),
        Completion::from_text("Sorry."),
    ]));
    let registry = Arc::new(default_registry());

    let result = RunToolCallingUseCase::new(gateway, registry)
        .execute(LoopInput::new("Weather in Kelvin?", params()))
        .await
        .unwrap();

    let payload: Value = serde_json::from_str(&result.tool_executions[0].result).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("celsius, fahrenheit"));
}

#[tokio::test]
async fn transcript_records_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.jsonl");
    let logger = Arc::new(JsonlConversationLogger::open(&path).unwrap());

    let gateway = Arc::new(ScriptedGateway::text(&["Final Answer: 4"]));
    let registry = Arc::new(default_registry());
    assert!(registry.has_tool("calculate"));

    RunReactUseCase::new(gateway, registry)
        .with_conversation_logger(logger.clone())
        .execute(LoopInput::new("2 + 2?", params()))
        .await
        .unwrap();
    drop(logger);

    let content = std::fs::read_to_string(&path).unwrap();
    let types: Vec<String> = content
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).unwrap();
            value["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(types.first().map(String::as_str), Some("loop_started"));
    assert_eq!(types.last().map(String::as_str), Some("loop_finished"));
}

#[tokio::test]
async fn loops_share_one_registry_concurrently() {
    let registry = Arc::new(default_registry());
    let react_gateway = Arc::new(ScriptedGateway::text(&[
        "Action: calculate\nAction Input: 6 * 7",
        "Final Answer: 42",
    ]));
    let calling_gateway = Arc::new(ScriptedGateway::new(vec![
        Completion::with_tool_calls(
            None,
            vec![ToolCallRequest::new(
                "call_1",
                "get_weather",
                r#"{"city": "Tokyo"}"#,
            )],
        ),
        Completion::from_text("Tokyo weather retrieved."),
    ]));

    let react = RunReactUseCase::new(react_gateway, registry.clone());
    let calling = RunToolCallingUseCase::new(calling_gateway, registry.clone());
    let (react_result, calling_result) = tokio::join!(
        react.execute(LoopInput::new("6 * 7?", params())),
        calling.execute(LoopInput::new("Weather in Tokyo?", params())),
    );

    let react_result = react_result.unwrap();
    assert_eq!(react_result.final_answer, "42");
    assert_eq!(react_result.tool_executions[0].result, "42");

    let calling_result = calling_result.unwrap();
    assert_eq!(calling_result.final_answer, "Tokyo weather retrieved.");
    let payload: Value = serde_json::from_str(&calling_result.tool_executions[0].result).unwrap();
    assert_eq!(payload["city"], "Tokyo");
}
