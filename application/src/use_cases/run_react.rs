//! Run React use case: the text-protocol loop
//!
//! ```text
//! BUILD_PROMPT ─▶ CALL_MODEL ─▶ DECODE ─┬─▶ ACT ────▶ Observation ──┐
//!                     ▲                 ├─▶ ANSWER ─▶ (self-check) ─┼─▶ ANSWER_ACCEPTED
//!                     │                 └─▶ STUCK ──▶ "Thought: " ──┤
//!                     └─────────────────────────────────────────────┘
//!                                    budget spent ─▶ BUDGET_EXHAUSTED
//! ```
//!
//! Every iteration makes exactly one model call, stopped at `Observation:`
//! so the model cannot invent tool results. A rejected self-check and a
//! stuck output both consume their iteration.

use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::loop_progress::{LoopProgressNotifier, NoLoopProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::{LoopState, check_cancelled, complete_bounded, log_finished};
use crate::use_cases::tool_helpers::tool_args_preview;
use crate::use_cases::types::{AgentLoopError, LoopInput};
use crate::use_cases::verify_answer::VerifyAnswerUseCase;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolloop_domain::{
    ActionDecoder, AgentPromptTemplate, CompletionOptions, Conversation, Decision, LoopMode,
    LoopResult, ReactGrammarDecoder, ToolArguments, ToolExecutionRecord,
};
use tracing::{debug, info, warn};

/// Use case for answering a question with the text-protocol loop
pub struct RunReactUseCase<G: CompletionGateway + 'static, T: ToolExecutorPort + 'static> {
    gateway: Arc<G>,
    tool_executor: Arc<T>,
    decoder: Arc<dyn ActionDecoder>,
    cancellation_token: Option<CancellationToken>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G, T> Clone for RunReactUseCase<G, T>
where
    G: CompletionGateway + 'static,
    T: ToolExecutorPort + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tool_executor: self.tool_executor.clone(),
            decoder: self.decoder.clone(),
            cancellation_token: self.cancellation_token.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<G: CompletionGateway + 'static, T: ToolExecutorPort + 'static> RunReactUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tool_executor: Arc<T>) -> Self {
        Self {
            gateway,
            tool_executor,
            decoder: Arc::new(ReactGrammarDecoder),
            cancellation_token: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the grammar used to decode model output.
    pub fn with_decoder(mut self, decoder: Arc<dyn ActionDecoder>) -> Self {
        self.decoder = decoder;
        self
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
    /// Cancellation yields `Ok` with [`LoopOutcome::Cancelled`]; only invalid
    /// input and gateway failures or timeouts are errors.
    ///
    /// [`LoopOutcome::Cancelled`]: toolloop_domain::LoopOutcome::Cancelled
    pub async fn execute_with_progress(
        &self,
        input: LoopInput,
        progress: &dyn LoopProgressNotifier,
    ) -> Result<LoopResult, AgentLoopError> {
        input.validate()?;
        info!(
            max_iterations = input.params.budget.get(),
            self_check = input.params.self_check,
            tools = self.tool_executor.specs().len(),
            "Starting text-protocol loop"
        );
        progress.on_loop_start(LoopMode::React, &input.question);
        self.logger.log(ConversationEvent::new(
            "loop_started",
            json!({
                "mode": LoopMode::React.as_str(),
                "question": input.question,
                "model": input.params.model.as_str(),
                "max_iterations": input.params.budget.get(),
                "self_check": input.params.self_check,
            }),
        ));

        let mut state = LoopState::default();
        let result = match self.drive(&input, &mut state, progress).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                info!(iterations = state.iterations, "Text-protocol loop cancelled");
                state.into_cancelled()
            }
            Err(e) => {
                warn!(error = %e, iterations = state.iterations, "Text-protocol loop aborted");
                return Err(e);
            }
        };

        info!(
            outcome = %result.outcome,
            iterations = result.iterations,
            "Text-protocol loop finished"
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

        let mut conversation = Conversation::with_system_prompt(AgentPromptTemplate::react_system(
            self.tool_executor.specs(),
        ));
        conversation.push_user(AgentPromptTemplate::react_question(&input.question));

        let options = CompletionOptions::new(params.model.clone())
            .with_temperature(params.temperature)
            .with_stop(AgentPromptTemplate::OBSERVATION_STOP);

        let verifier = VerifyAnswerUseCase::new(self.gateway.clone())
            .with_cancellation(self.cancellation_token.clone())
            .with_conversation_logger(self.logger.clone());

        for iteration in 1..=max_iterations {
            check_cancelled(&self.cancellation_token)?;
            state.iterations = iteration;
            progress.on_iteration_start(iteration, max_iterations);
            debug!(iteration, "Calling model");

            let completion = complete_bounded(
                self.gateway.as_ref(),
                &conversation,
                &options,
                params.gateway_timeout,
                &self.cancellation_token,
            )
            .await?;

            let output = completion.text_content().to_string();
            progress.on_model_output(&output);
            self.logger.log(ConversationEvent::new(
                "model_response",
                json!({ "iteration": iteration, "text": output }),
            ));
            state.trace.push_str(&output);
            conversation.push_assistant(output.clone());

            match self.decoder.decode(&output) {
                Decision::FinalAnswer(answer) => {
                    if !params.self_check {
                        return Ok(state.answered(answer));
                    }

                    let verdict = verifier.execute(&input.question, &answer, params).await?;
                    progress.on_verification(&answer, verdict.is_verified());
                    if verdict.is_verified() {
                        return Ok(state.answered(answer));
                    }

                    warn!(iteration, "Self-check rejected the candidate answer");
                    state.note(&mut conversation, AgentPromptTemplate::CORRECTIVE_THOUGHT);
                }
                Decision::Act { tool, input: text } => {
                    let args = ToolArguments::text(text);
                    let observation = self.act(&tool, &args, iteration, state, progress).await?;
                    state.note(
                        &mut conversation,
                        &AgentPromptTemplate::observation(&observation),
                    );
                }
                Decision::Stuck => {
                    debug!(iteration, "No action or final answer in model output");
                    progress.on_stuck(iteration);
                    state.note(&mut conversation, AgentPromptTemplate::CONTINUATION_CUE);
                }
            }
        }

        Ok(state.exhausted())
    }

    /// Execute one decoded action and return its observation text.
    async fn act(
        &self,
        tool: &str,
        args: &ToolArguments,
        iteration: usize,
        state: &mut LoopState,
        progress: &dyn LoopProgressNotifier,
    ) -> Result<String, AgentLoopError> {
        check_cancelled(&self.cancellation_token)?;

        if !self.tool_executor.has_tool(tool) {
            warn!(tool, "Model requested an unregistered tool");
            let observation = AgentPromptTemplate::unknown_tool(tool);
            progress.on_tool_result(tool, &observation);
            return Ok(observation);
        }

        progress.on_tool_call(tool, &tool_args_preview(args));
        self.logger.log(ConversationEvent::new(
            "tool_call",
            json!({ "iteration": iteration, "tool": tool, "arguments": args.render() }),
        ));

        let result = self.tool_executor.execute(tool, args).await;
        debug!(tool, bytes = result.len(), "Tool returned");

        progress.on_tool_result(tool, &result);
        self.logger.log(ConversationEvent::new(
            "tool_result",
            json!({ "iteration": iteration, "tool": tool, "result": result }),
        ));
        state
            .records
            .push(ToolExecutionRecord::new(tool, args.render(), result.clone()));

        Ok(result)
    }
}
