//! Self-verification of candidate answers
//!
//! One extra completion shows the model the original question and the
//! candidate answer and asks for a verdict. The answer is accepted when the
//! reply contains the acceptance token anywhere.

use crate::config::LoopParams;
use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::use_cases::shared::complete_bounded;
use crate::use_cases::types::AgentLoopError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolloop_domain::{AgentPromptTemplate, CompletionOptions, Conversation};
use tracing::debug;

/// Verdict on a candidate answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Verified,
    /// Carries the verifier's reply.
    Rejected(String),
}

impl Verdict {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verdict::Verified)
    }

    /// Classify a verifier reply by substring match on the acceptance token.
    pub fn from_reply(reply: &str) -> Self {
        if reply.contains(AgentPromptTemplate::VERIFIED_TOKEN) {
            Verdict::Verified
        } else {
            Verdict::Rejected(reply.to_string())
        }
    }
}

/// Use case for verifying a candidate final answer
pub struct VerifyAnswerUseCase<G: CompletionGateway + 'static> {
    gateway: Arc<G>,
    cancellation_token: Option<CancellationToken>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: CompletionGateway + 'static> VerifyAnswerUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            cancellation_token: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_cancellation(mut self, token: Option<CancellationToken>) -> Self {
        self.cancellation_token = token;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Ask the model to judge `answer` against `question`.
    ///
    /// Uses temperature 0, no stop sequences and no tools.
    pub async fn execute(
        &self,
        question: &str,
        answer: &str,
        params: &LoopParams,
    ) -> Result<Verdict, AgentLoopError> {
        let mut conversation = Conversation::new();
        conversation.push_user(AgentPromptTemplate::verification(question, answer));
        let options = CompletionOptions::new(params.model.clone()).with_temperature(0.0);

        let completion = complete_bounded(
            self.gateway.as_ref(),
            &conversation,
            &options,
            params.gateway_timeout,
            &self.cancellation_token,
        )
        .await?;

        let verdict = Verdict::from_reply(completion.text_content());
        debug!(verified = verdict.is_verified(), "Self-check verdict");
        self.logger.log(ConversationEvent::new(
            "verification",
            serde_json::json!({
                "answer": answer,
                "reply": completion.text_content(),
                "verified": verdict.is_verified(),
            }),
        ));

        Ok(verdict)
    }
}
