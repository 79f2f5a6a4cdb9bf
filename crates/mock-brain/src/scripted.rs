//! A chat provider that plays back a script.

use std::collections::VecDeque;

use brain_core::{
    async_trait, BrainError, ChatMessage, ChatProvider, ChatReply, ToolCall, ToolDefinition,
};
use tokio::sync::Mutex;

enum Step {
    Reply(Result<ChatReply, BrainError>),
    Compose(fn(&[ChatMessage]) -> String),
}

/// A [`ChatProvider`] that answers from a queue of scripted steps.
///
/// Every request is recorded, so tests can check what the agent sent. Once
/// the script runs out each further request fails.
#[derive(Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    offered_tools: Mutex<Vec<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, step: Step) -> Self {
        self.steps.get_mut().push_back(step);
        self
    }

    /// Reply with a final answer.
    pub fn then_answer(self, text: impl Into<String>) -> Self {
        self.push(Step::Reply(Ok(ChatReply::Answer(text.into()))))
    }

    /// Reply with a final answer built from the conversation sent.
    pub fn then_answer_with(self, compose: fn(&[ChatMessage]) -> String) -> Self {
        self.push(Step::Compose(compose))
    }

    /// Reply with a single tool call.
    pub fn then_tool_call(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        self.then_tool_calls(vec![ToolCall {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }])
    }

    /// Reply with several tool calls at once.
    pub fn then_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.push(Step::Reply(Ok(ChatReply::ToolCalls {
            content: None,
            calls,
        })))
    }

    /// Fail the request.
    pub fn then_error(self, error: BrainError) -> Self {
        self.push(Step::Reply(Err(error)))
    }

    /// Every conversation sent so far, oldest first.
    pub async fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().await.clone()
    }

    /// Tool names offered with each request.
    pub async fn offered_tools(&self) -> Vec<Vec<String>> {
        self.offered_tools.lock().await.clone()
    }

    /// Steps not yet consumed.
    pub async fn remaining(&self) -> usize {
        self.steps.lock().await.len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "ScriptedProvider"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatReply, BrainError> {
        self.requests.lock().await.push(messages.to_vec());
        self.offered_tools
            .lock()
            .await
            .push(tools.iter().map(|t| t.name.clone()).collect());

        match self.steps.lock().await.pop_front() {
            Some(Step::Reply(reply)) => reply,
            Some(Step::Compose(compose)) => Ok(ChatReply::Answer(compose(messages))),
            None => Err(BrainError::ProcessingFailed(
                "scripted provider has no replies left".to_string(),
            )),
        }
    }
}
