//! Core traits and types for the poker coach agent.
//!
//! This crate provides the shared interface between the HTTP layer, the
//! reasoning brain and the tools it can call. It defines:
//!
//! - [`Brain`] - The trait that agent implementations must implement
//! - [`InboundMessage`] / [`OutboundMessage`] - Message types for input/output
//! - [`BrainError`] - Error types for brain operations
//! - [`ChatProvider`] - The reasoning backend (an LLM with function calling)
//! - [`ToolExecutor`] - Trait for executing the tools a brain selects
//! - [`ConversationHistory`] - Per-session history with LRU eviction
//! - [`RetryPolicy`] - Bounded timeout and retry for external calls
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, InboundMessage, OutboundMessage};
//! use async_trait::async_trait;
//!
//! struct MyBrain;
//!
//! #[async_trait]
//! impl Brain for MyBrain {
//!     async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
//!         Ok(OutboundMessage::reply_to(&message, "Fold."))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyBrain"
//!     }
//! }
//! ```

mod chat;
mod embedding;
mod error;
mod history;
mod message;
mod prompt;
mod retry;
mod tools;
mod trait_def;

pub use chat::{ChatMessage, ChatProvider, ChatReply, ChatRole, ToolCall};
pub use embedding::Embedder;
pub use error::BrainError;
pub use history::{ConversationHistory, HistoryMessage};
pub use message::{InboundMessage, OutboundMessage};
pub use prompt::hash_prompt;
pub use retry::{RetryPolicy, Retryable};
pub use tools::{ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
