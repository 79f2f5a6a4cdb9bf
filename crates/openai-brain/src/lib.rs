//! OpenAI-backed reasoning agent for the poker coach.
//!
//! This crate provides a brain implementation that answers a message by
//! letting an OpenAI chat model call tools through OpenAI function calling
//! until it produces a final answer.
//!
//! # Features
//!
//! - Per-session conversation history
//! - Sequential tool calls through any `brain_core::ToolExecutor`
//! - Bounded reasoning loop (`AGENT_MAX_ITERATIONS`)
//! - Timeout and retry around every API call
//! - Embeddings for retrieval via [`OpenAiClient`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agent_tools::{RegistryToolExecutor, ToolRegistry, PotOdds};
//! use openai_brain::{Brain, InboundMessage, OpenAiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = ToolRegistry::new();
//!     registry.register(PotOdds::new());
//!
//!     let brain = OpenAiBrain::from_env()?
//!         .with_tools(Arc::new(RegistryToolExecutor::new(registry)));
//!
//!     let reply = brain
//!         .process(InboundMessage::in_session("table-1", "I face 50 into 200. Call?"))
//!         .await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod client;
mod config;

pub use brain::{OpenAiBrain, ITERATION_LIMIT_MESSAGE};
pub use client::OpenAiClient;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder, DEFAULT_PROMPT_FILE, DEFAULT_SYSTEM_PROMPT};

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, Brain, BrainError, ChatProvider, ConversationHistory, Embedder, InboundMessage,
    OutboundMessage, ToolExecutor,
};
