//! Run Tool Calling use case: the structured-call loop
//!
//! Tool specs go out with every model call. The loop ends when the
//! assistant turn carries no tool calls; its text is the final answer.
//! Otherwise each requested call produces its own `tool` turn, correlated
//! by call id, in the order the model asked for them.
//!
//! Calls run sequentially unless [`LoopParams::parallel_tool_calls`] is set,
//! in which case they run concurrently but are still appended in request
//! order.
//!
//! [`LoopParams::parallel_tool_calls`]: crate::config::LoopParams::parallel_tool_calls

use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::loop_progress::{LoopProgressNotifier, NoLoopProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::{LoopState, check_cancelled, complete_bounded, log_finished};
use crate::use_cases::tool_helpers::{tool_args_preview, truncate_preview};
use crate::use_cases::types::{AgentLoopError, LoopInput};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolloop_domain::{
    AgentPromptTemplate, CompletionOptions, Conversation, DefaultToolValidator, LoopMode,
    LoopResult, ToolCallRequest, ToolChoice, ToolExecutionRecord, ToolValidator, error_payload,
};
use tracing::{debug, info, warn};

/// Use case for answering a question with native function calling
pub struct RunToolCallingUseCase<G: CompletionGateway + 'static, T: ToolExecutorPort + 'static> {
    gateway: Arc<G>,
    tool_executor: Arc<T>,
    validator: DefaultToolValidator,
    cancellation_token: Option<CancellationToken>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G, T> Clone for RunToolCallingUseCase<G, T>
where
    G: CompletionGateway + 'static,
    T: ToolExecutorPort + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tool_executor: self.tool_executor.clone(),
            validator: self.validator.clone(),
            cancellation_token: self.cancellation_token.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<G: CompletionGateway + 'static, T: ToolExecutorPort + 'static> RunToolCallingUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tool_executor: Arc<T>) -> Self {
        Self {
            gateway,
            tool_executor,
            validator: DefaultToolValidator,
            cancellation_token: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(&self, input: LoopInput) -> Result<LoopResult, AgentLoopError> {
        self.execute_with_progress(input, &NoLoopProgress).await
    }

    /// Run the loop to one of its outcomes.
    ///
    /// Self-check does not apply to this variant.
    pub async fn execute_with_progress(
        &self,
        input: LoopInput,
        progress: &dyn LoopProgressNotifier,
    ) -> Result<LoopResult, AgentLoopError> {
        input.validate()?;
        info!(
            max_iterations = input.params.budget.get(),
            parallel = input.params.parallel_tool_calls,
            tools = self.tool_executor.specs().len(),
            "Starting structured-call loop"
        );
        progress.on_loop_start(LoopMode::ToolCalling, &input.question);
        self.logger.log(ConversationEvent::new(
            "loop_started",
            json!({
                "mode": LoopMode::ToolCalling.as_str(),
                "question": input.question,
                "model": input.params.model.as_str(),
                "max_iterations": input.params.budget.get(),
            }),
        ));

        let mut state = LoopState::default();
        let result = match self.drive(&input, &mut state, progress).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                info!(iterations = state.iterations, "Structured-call loop cancelled");
                state.into_cancelled()
            }
            Err(e) => {
                warn!(error = %e, iterations = state.iterations, "Structured-call loop aborted");
                return Err(e);
            }
        };

        info!(
            outcome = %result.outcome,
            iterations = result.iterations,
            tool_executions = result.tool_executions.len(),
            "Structured-call loop finished"
        );
        log_finished(self.logger.as_ref(), &result);
        progress.on_finish(&result);
        Ok(result)
    }

    async fn drive(
        &self,
        input: &LoopInput,
        state: &mut LoopState,
        progress: &dyn LoopProgressNotifier,
    ) -> Result<LoopResult, AgentLoopError> {
        let params = &input.params;
        let max_iterations = params.budget.get();

        let mut conversation =
            Conversation::with_system_prompt(AgentPromptTemplate::tool_calling_system());
        conversation.push_user(input.question.as_str());

        let options = CompletionOptions::new(params.model.clone())
            .with_temperature(params.temperature)
            .with_tools(self.tool_executor.specs().to_vec(), ToolChoice::Auto);

        for iteration in 1..=max_iterations {
            check_cancelled(&self.cancellation_token)?;
            state.iterations = iteration;
            progress.on_iteration_start(iteration, max_iterations);
            debug!(iteration, "Calling model with tools");

            let completion = complete_bounded(
                self.gateway.as_ref(),
                &conversation,
                &options,
                params.gateway_timeout,
                &self.cancellation_token,
            )
            .await?;

            if !completion.text_content().is_empty() {
                progress.on_model_output(completion.text_content());
            }
            self.logger.log(ConversationEvent::new(
                "model_response",
                json!({
                    "iteration": iteration,
                    "text": completion.text,
                    "tool_calls": completion.tool_calls.len(),
                }),
            ));

            if !completion.has_tool_calls() {
                let answer = completion.text_content().to_string();
                state.trace_line(&format!("Assistant: {}", answer));
                conversation.push_assistant(answer.clone());
                return Ok(state.answered(answer));
            }

            if let Some(text) = completion.text.as_deref().filter(|t| !t.is_empty()) {
                state.trace_line(&format!("Assistant: {}", text));
            }
            let calls = completion.tool_calls;
            conversation.push_assistant_tool_calls(completion.text, calls.clone());

            if params.parallel_tool_calls {
                check_cancelled(&self.cancellation_token)?;
                let results = futures::future::join_all(
                    calls
                        .iter()
                        .map(|call| self.run_call(call, iteration, progress)),
                )
                .await;
                for (call, result) in calls.iter().zip(results) {
                    record_call(state, &mut conversation, call, result);
                }
            } else {
                // Each call is recorded before the next cancellation check,
                // so a cancelled run still reports what already executed.
                for call in &calls {
                    check_cancelled(&self.cancellation_token)?;
                    let result = self.run_call(call, iteration, progress).await;
                    record_call(state, &mut conversation, call, result);
                }
            }
        }

        Ok(state.exhausted())
    }

    /// Decode, validate and execute one call. Failures stay local to the call.
    async fn run_call(
        &self,
        call: &ToolCallRequest,
        iteration: usize,
        progress: &dyn LoopProgressNotifier,
    ) -> String {
        let args = match call.decode_arguments() {
            Ok(args) => args,
            Err(message) => {
                warn!(tool = %call.name, call_id = %call.id, "Undecodable tool arguments");
                let payload = error_payload(&message);
                progress.on_tool_result(&call.name, &payload);
                return payload;
            }
        };

        if let Some(spec) = self.tool_executor.spec(&call.name)
            && let Err(e) = self.validator.validate(&args, spec)
        {
            warn!(tool = %call.name, call_id = %call.id, error = %e, "Invalid tool arguments");
            let payload = e.to_payload();
            progress.on_tool_result(&call.name, &payload);
            return payload;
        }

        progress.on_tool_call(&call.name, &tool_args_preview(&args));
        self.logger.log(ConversationEvent::new(
            "tool_call",
            json!({
                "iteration": iteration,
                "call_id": call.id,
                "tool": call.name,
                "arguments": args.render(),
            }),
        ));

        let result = self.tool_executor.execute(&call.name, &args).await;
        debug!(tool = %call.name, call_id = %call.id, bytes = result.len(), "Tool returned");

        progress.on_tool_result(&call.name, &result);
        self.logger.log(ConversationEvent::new(
            "tool_result",
            json!({
                "iteration": iteration,
                "call_id": call.id,
                "tool": call.name,
                "result": result,
            }),
        ));
        result
    }
}

fn record_call(
    state: &mut LoopState,
    conversation: &mut Conversation,
    call: &ToolCallRequest,
    result: String,
) {
    state.trace_line(&format!(
        "Tool {}({}) -> {}",
        call.name,
        call.raw_arguments,
        truncate_preview(&result, 200)
    ));
    conversation.push_tool_result(&call.id, &call.name, result.as_str());
    state.records.push(ToolExecutionRecord::new(
        &call.name,
        &call.raw_arguments,
        result,
    ));
}
