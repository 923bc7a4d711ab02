//! Scripted test doubles shared by the use case tests.

use crate::ports::completion_gateway::{CompletionGateway, GatewayError};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use toolloop_domain::{
    Completion, CompletionOptions, Conversation, ToolArguments, ToolCallRequest, ToolSpec,
    error_payload,
};

/// A scripted gateway reply
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Reply(Completion),
    Error(GatewayError),
    /// Never completes; exercises timeouts and cancellation.
    Hang,
}

impl Scripted {
    pub(crate) fn text(text: &str) -> Self {
        Scripted::Reply(Completion::from_text(text))
    }

    pub(crate) fn tool_calls(calls: &[(&str, &str, &str)]) -> Self {
        Scripted::Reply(Completion::with_tool_calls(
            None,
            calls
                .iter()
                .map(|(id, name, args)| ToolCallRequest::new(*id, *name, *args))
                .collect(),
        ))
    }
}

/// Gateway that replays scripted replies in order and records every request.
///
/// When the script runs out it keeps answering with `fallback`.
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Scripted>>,
    fallback: Scripted,
    requests: Mutex<Vec<(Conversation, CompletionOptions)>>,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: Vec<Scripted>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: Scripted::text("(no more responses)"),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A gateway that answers every call with the same reply.
    pub(crate) fn repeating(reply: Scripted) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<(Conversation, CompletionOptions)> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> Result<Completion, GatewayError> {
        self.requests
            .lock()
            .unwrap()
            .push((conversation.clone(), options.clone()));

        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match next {
            Scripted::Reply(completion) => Ok(completion),
            Scripted::Error(e) => Err(e),
            Scripted::Hang => std::future::pending().await,
        }
    }
}

/// Tool executor with canned replies per tool name.
pub(crate) struct StaticTools {
    specs: Vec<ToolSpec>,
    replies: HashMap<String, String>,
    calls: Mutex<Vec<(String, ToolArguments)>>,
    cancel_on: Option<(String, CancellationToken)>,
}

impl StaticTools {
    pub(crate) fn new() -> Self {
        Self {
            specs: Vec::new(),
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            cancel_on: None,
        }
    }

    /// Fire `token` while executing the tool called `name`.
    pub(crate) fn cancelling_on(mut self, name: &str, token: CancellationToken) -> Self {
        self.cancel_on = Some((name.to_string(), token));
        self
    }

    pub(crate) fn with_tool(mut self, spec: ToolSpec, reply: &str) -> Self {
        self.replies.insert(spec.name.clone(), reply.to_string());
        self.specs.push(spec);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, ToolArguments)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutorPort for StaticTools {
    fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    async fn execute(&self, name: &str, args: &ToolArguments) -> String {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), args.clone()));
        if let Some((target, token)) = &self.cancel_on
            && target == name
        {
            token.cancel();
        }
        match self.replies.get(name) {
            Some(reply) => reply.clone(),
            None => error_payload(&format!("Tool '{}' does not exist", name)),
        }
    }
}
