//! OpenAiBrain: a reasoning agent that calls tools until it can answer.

use std::sync::Arc;

use brain_core::{
    async_trait, hash_prompt, Brain, BrainError, ChatMessage, ChatProvider, ChatReply,
    ConversationHistory, InboundMessage, OutboundMessage, ToolCall, ToolDefinition, ToolExecutor,
    ToolRequest, ToolResult,
};
use tracing::{debug, info, warn};

use crate::client::OpenAiClient;
use crate::config::OpenAiBrainConfig;

/// Answer given when the agent runs out of reasoning steps.
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

/// Answer given when the model returns an empty reply.
const EMPTY_ANSWER_FALLBACK: &str = "I apologize, but I couldn't generate a response.";

/// Where the agent is within one message.
enum AgentState {
    /// Waiting on the model.
    Reasoning,
    /// Running the tool calls the model asked for, in order.
    ToolInvoking(Vec<ToolCall>),
    /// The model produced its final answer.
    Responding(String),
}

/// A brain that reasons with an OpenAI chat model and calls tools.
///
/// History is kept per session: a message with a session id sees the
/// previous exchanges of that session, one without is answered statelessly.
/// Only the user prompt and the final answer of each exchange are stored.
pub struct OpenAiBrain {
    provider: Arc<dyn ChatProvider>,
    tools: Option<Arc<dyn ToolExecutor>>,
    config: OpenAiBrainConfig,
    history: ConversationHistory,
    system_prompt_hash: Option<String>,
}

impl OpenAiBrain {
    /// Create a new OpenAiBrain talking to the OpenAI API.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, BrainError> {
        let client = OpenAiClient::new(&config)?;
        Ok(Self::with_provider(config, Arc::new(client)))
    }

    /// Create an OpenAiBrain from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(OpenAiBrainConfig::from_env()?)
    }

    /// Create an OpenAiBrain on top of any chat provider.
    pub fn with_provider(config: OpenAiBrainConfig, provider: Arc<dyn ChatProvider>) -> Self {
        let history = ConversationHistory::new(config.max_history_turns);
        let system_prompt_hash = config.system_prompt.as_deref().map(hash_prompt);

        if let Some(ref hash) = system_prompt_hash {
            info!("OpenAiBrain system prompt fingerprint: {}", hash);
        }

        info!(
            "OpenAiBrain initialized with provider: {}, model: {}, max_iterations: {}",
            provider.name(),
            config.model,
            config.max_iterations
        );

        Self {
            provider,
            tools: None,
            config,
            history,
            system_prompt_hash,
        }
    }

    /// Give the agent tools to call.
    pub fn with_tools(mut self, tools: Arc<dyn ToolExecutor>) -> Self {
        let names: Vec<String> = tools.definitions().into_iter().map(|d| d.name).collect();
        info!("OpenAiBrain tools: {}", names.join(", "));
        self.tools = Some(tools);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    /// Get the system prompt fingerprint, if configured.
    pub fn system_prompt_hash(&self) -> Option<&str> {
        self.system_prompt_hash.as_deref()
    }

    /// Clear conversation history for a session.
    pub async fn clear_history(&self, session_id: &str) {
        self.history.clear(session_id).await;
    }

    /// Clear all conversation histories.
    pub async fn clear_all_history(&self) {
        self.history.clear_all().await;
    }

    /// System prompt, session history, then the new user message.
    async fn build_messages(&self, session_id: Option<&str>, user_text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::new();

        if let Some(ref system_prompt) = self.config.system_prompt {
            messages.push(ChatMessage::system(system_prompt.clone()));
        }

        if let Some(session_id) = session_id {
            messages.extend(
                self.history
                    .get(session_id)
                    .await
                    .into_iter()
                    .map(ChatMessage::from),
            );
        }

        messages.push(ChatMessage::user(user_text));
        messages
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .as_ref()
            .map(|tools| tools.definitions())
            .unwrap_or_default()
    }

    /// Run one tool call. Failures come back as error results.
    async fn invoke_tool(&self, call: &ToolCall) -> ToolResult {
        let request = match ToolRequest::from_call(&call.id, &call.name, &call.arguments) {
            Ok(request) => request,
            Err(e) => {
                warn!("Tool call {} to '{}' has invalid arguments: {}", call.id, call.name, e);
                return ToolResult::error(
                    &call.id,
                    format!("Invalid JSON arguments for {}: {}", call.name, e),
                );
            }
        };

        match self.tools {
            Some(ref tools) => tools.execute(request).await,
            None => ToolResult::error(&call.id, format!("Unknown tool: {}", call.name)),
        }
    }

    /// Drive the reasoning loop until the model answers or the step budget runs out.
    async fn run_agent(&self, mut messages: Vec<ChatMessage>) -> Result<String, BrainError> {
        let definitions = self.tool_definitions();
        let mut steps = 0;
        let mut state = AgentState::Reasoning;

        loop {
            state = match state {
                AgentState::Reasoning => {
                    if steps >= self.config.max_iterations {
                        warn!("Agent hit the iteration limit ({})", self.config.max_iterations);
                        return Ok(ITERATION_LIMIT_MESSAGE.to_string());
                    }
                    steps += 1;

                    match self.provider.complete(&messages, &definitions).await? {
                        ChatReply::ToolCalls { content, calls } if !calls.is_empty() => {
                            messages.push(ChatMessage::assistant_tool_calls(content, calls.clone()));
                            AgentState::ToolInvoking(calls)
                        }
                        ChatReply::ToolCalls { content, .. } => {
                            AgentState::Responding(content.unwrap_or_default())
                        }
                        ChatReply::Answer(text) => AgentState::Responding(text),
                    }
                }
                AgentState::ToolInvoking(calls) => {
                    for call in calls {
                        debug!("Step {}: calling tool '{}'", steps, call.name);
                        let result = self.invoke_tool(&call).await;
                        if !result.success {
                            debug!("Tool '{}' failed: {}", call.name, result.content);
                        }
                        messages.push(ChatMessage::tool_result(call.id, result.content));
                    }
                    AgentState::Reasoning
                }
                AgentState::Responding(text) => {
                    debug!("Agent answered after {} steps", steps);
                    return Ok(text);
                }
            };
        }
    }
}

#[async_trait]
impl Brain for OpenAiBrain {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        let session_id = message.session_id.as_deref();
        let user_text = &message.text;

        debug!(
            "Processing message for session {:?}: {}",
            session_id, user_text
        );

        let messages = self.build_messages(session_id, user_text).await;
        let answer = self.run_agent(messages).await?;

        let answer = if answer.trim().is_empty() {
            warn!("No content in response, using default");
            EMPTY_ANSWER_FALLBACK.to_string()
        } else {
            answer
        };

        if let Some(session_id) = session_id {
            self.history
                .add_exchange(session_id, user_text, &answer)
                .await;
        }

        Ok(OutboundMessage::reply_to(&message, answer))
    }

    fn name(&self) -> &str {
        "OpenAiBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_tools::{Calculator, PotOdds, RegistryToolExecutor, ToolRegistry};
    use brain_core::ChatRole;
    use mock_brain::ScriptedProvider;

    fn config() -> OpenAiBrainConfig {
        OpenAiBrainConfig::builder()
            .api_key("sk-test")
            .system_prompt("You are a poker coach.")
            .build()
    }

    fn poker_tools() -> Arc<dyn ToolExecutor> {
        let mut registry = ToolRegistry::new();
        registry.register(PotOdds::new());
        registry.register(Calculator::new());
        Arc::new(RegistryToolExecutor::new(registry))
    }

    fn brain(provider: &Arc<ScriptedProvider>) -> OpenAiBrain {
        OpenAiBrain::with_provider(config(), provider.clone()).with_tools(poker_tools())
    }

    fn tool_turns(messages: &[ChatMessage]) -> Vec<(String, String)> {
        messages
            .iter()
            .filter(|m| m.role == ChatRole::Tool)
            .map(|m| {
                (
                    m.tool_call_id.clone().unwrap_or_default(),
                    m.content.clone().unwrap_or_default(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_direct_answer() {
        let provider = Arc::new(ScriptedProvider::new().then_answer("Fold the 7-2 offsuit."));
        let brain = brain(&provider);

        let response = brain
            .process(InboundMessage::in_session("s1", "What do I do with 7-2?"))
            .await
            .unwrap();

        assert_eq!(response.text, "Fold the 7-2 offsuit.");
        assert_eq!(response.session_id.as_deref(), Some("s1"));

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][0], ChatMessage::system("You are a poker coach."));
        assert_eq!(requests[0][1], ChatMessage::user("What do I do with 7-2?"));
        assert_eq!(
            provider.offered_tools().await[0],
            vec!["pot_odds".to_string(), "calculator".to_string()]
        );
    }

    #[tokio::test]
    async fn test_pot_odds_tool_round_trip() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_tool_call("call_1", "pot_odds", r#"{"input":"50,200"}"#)
                .then_answer_with(|messages| {
                    let odds = messages
                        .last()
                        .and_then(|m| m.content.clone())
                        .unwrap_or_default();
                    format!("Your pot odds are {}, so you need 20% equity to call.", odds)
                }),
        );
        let brain = brain(&provider);

        let response = brain
            .process(InboundMessage::stateless("I bet 50 into a 200 pot, should I call?"))
            .await
            .unwrap();

        assert!(response.text.contains("0.2"));

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        assert_eq!(second[second.len() - 2].tool_calls[0].name, "pot_odds");
        assert_eq!(
            tool_turns(second),
            vec![("call_1".to_string(), "0.2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_sequential_tool_calls_keep_order() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_tool_calls(vec![
                    ToolCall {
                        id: "a".to_string(),
                        name: "pot_odds".to_string(),
                        arguments: r#"{"opponent_bet":100,"pot_size":100}"#.to_string(),
                    },
                    ToolCall {
                        id: "b".to_string(),
                        name: "calculator".to_string(),
                        arguments: r#"{"expression":"1 - 0.5"}"#.to_string(),
                    },
                ])
                .then_answer("Even money."),
        );
        let brain = brain(&provider);

        let response = brain
            .process(InboundMessage::stateless("Pot-sized bet?"))
            .await
            .unwrap();
        assert_eq!(response.text, "Even money.");

        let requests = provider.requests().await;
        assert_eq!(
            tool_turns(&requests[1]),
            vec![
                ("a".to_string(), "0.5".to_string()),
                ("b".to_string(), "1 - 0.5 = 0.5".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_tool_failures_do_not_abort() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_tool_call("bad_json", "pot_odds", "{not json")
                .then_tool_call("bad_input", "pot_odds", r#"{"input":"fifty,200"}"#)
                .then_tool_call("zero", "pot_odds", r#"{"opponent_bet":0,"pot_size":0}"#)
                .then_tool_call("unknown", "dealer", "{}")
                .then_answer("I could not compute the odds."),
        );
        let brain = brain(&provider);

        let response = brain
            .process(InboundMessage::stateless("Odds?"))
            .await
            .unwrap();
        assert_eq!(response.text, "I could not compute the odds.");

        let requests = provider.requests().await;
        let turns = tool_turns(&requests[4]);
        assert_eq!(turns.len(), 4);
        for (id, content) in &turns {
            assert!(content.starts_with("Error: "), "{}: {}", id, content);
        }
        assert!(turns[3].1.contains("dealer"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_fatal_and_not_remembered() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_error(BrainError::ProviderUnavailable("down".to_string()))
                .then_answer("Second try."),
        );
        let brain = brain(&provider);

        let result = brain
            .process(InboundMessage::in_session("s1", "First question"))
            .await;
        assert!(matches!(result, Err(BrainError::ProviderUnavailable(_))));

        brain
            .process(InboundMessage::in_session("s1", "Second question"))
            .await
            .unwrap();

        let requests = provider.requests().await;
        let second = &requests[1];
        assert_eq!(second.len(), 2);
        assert_eq!(second[1], ChatMessage::user("Second question"));
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let mut provider = ScriptedProvider::new();
        for i in 0..10 {
            provider = provider.then_tool_call(format!("c{}", i), "pot_odds", r#"{"input":"1,1"}"#);
        }
        let provider = Arc::new(provider);
        let config = OpenAiBrainConfig::builder()
            .api_key("sk-test")
            .max_iterations(3)
            .build();
        let brain = OpenAiBrain::with_provider(config, provider.clone()).with_tools(poker_tools());

        let response = brain
            .process(InboundMessage::stateless("Loop forever"))
            .await
            .unwrap();

        assert_eq!(
            response.text,
            "Agent stopped due to iteration limit or time limit."
        );
        assert_eq!(provider.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_history_is_per_session() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_answer("Answer A1")
                .then_answer("Answer B1")
                .then_answer("Answer A2"),
        );
        let brain = brain(&provider);

        brain
            .process(InboundMessage::in_session("alice", "Question A1"))
            .await
            .unwrap();
        brain
            .process(InboundMessage::in_session("bob", "Question B1"))
            .await
            .unwrap();
        brain
            .process(InboundMessage::in_session("alice", "Question A2"))
            .await
            .unwrap();

        let requests = provider.requests().await;

        // Bob sees only the system prompt and his own question.
        assert_eq!(requests[1].len(), 2);

        // Alice's second request carries her first exchange, and nothing of Bob's.
        assert_eq!(
            requests[2],
            vec![
                ChatMessage::system("You are a poker coach."),
                ChatMessage::user("Question A1"),
                ChatMessage::assistant("Answer A1"),
                ChatMessage::user("Question A2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_stateless_messages_are_not_remembered() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_answer("One")
                .then_answer("Two"),
        );
        let brain = brain(&provider);

        brain.process(InboundMessage::stateless("First")).await.unwrap();
        brain.process(InboundMessage::stateless("Second")).await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests[1].len(), 2);
    }

    #[tokio::test]
    async fn test_empty_answer_fallback() {
        let provider = Arc::new(ScriptedProvider::new().then_answer("   "));
        let brain = brain(&provider);

        let response = brain.process(InboundMessage::stateless("?")).await.unwrap();
        assert_eq!(response.text, EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn test_without_tools() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_tool_call("c1", "pot_odds", r#"{"input":"50,200"}"#)
                .then_answer("Done."),
        );
        let brain = OpenAiBrain::with_provider(config(), provider.clone());

        brain.process(InboundMessage::stateless("Odds?")).await.unwrap();

        let requests = provider.requests().await;
        assert!(provider.offered_tools().await[0].is_empty());
        assert!(tool_turns(&requests[1])[0].1.contains("Unknown tool"));
    }

    #[test]
    fn test_prompt_fingerprint() {
        let provider = Arc::new(ScriptedProvider::new());
        let brain = OpenAiBrain::with_provider(config(), provider);
        assert_eq!(
            brain.system_prompt_hash(),
            Some(hash_prompt("You are a poker coach.").as_str())
        );
        assert_eq!(brain.name(), "OpenAiBrain");
    }
}
