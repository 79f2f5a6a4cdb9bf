//! HTTP API for the poker coach agent.
//!
//! `GET /` answers with a fixed greeting. `POST /response` takes
//! `{"prompt": "...", "session_id": "..."}` and answers with the agent's
//! reply as a JSON string. The session id is optional and is echoed in the
//! `x-session-id` response header.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use agent_tools::{registry_from_config, PineconeRetriever, RegistryToolExecutor, ToolPolicy};
use axum::Router;
use openai_brain::{OpenAiBrain, OpenAiBrainConfig, OpenAiClient};
use tracing::info;

pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use state::AppState;

/// Build the router for the given state.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}

/// Wire the coach: OpenAI client, textbook index, tools and agent.
///
/// Fails if the textbook index cannot be reached.
pub async fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    let client = Arc::new(OpenAiClient::new(&config.brain)?);

    let retriever = PineconeRetriever::from_config(client.clone(), &config.tools);
    retriever.describe().await?;

    let mut registry = registry_from_config(&config.tools, Arc::new(retriever));

    // Answers textbook questions from retrieved passages: no persona, no memory, no tools.
    let qa_config = OpenAiBrainConfig {
        system_prompt: None,
        max_history_turns: 0,
        ..config.brain.clone()
    };
    registry.set_brain(Arc::new(OpenAiBrain::with_provider(qa_config, client.clone())));

    let policy = ToolPolicy::default().with_retry(config.tools.retry_policy());
    let executor = RegistryToolExecutor::with_policy(registry, policy);

    let brain = OpenAiBrain::with_provider(config.brain.clone(), client)
        .with_tools(Arc::new(executor));
    info!(model = %config.brain.model, "Poker coach ready");

    Ok(AppState::new(Arc::new(brain)))
}
