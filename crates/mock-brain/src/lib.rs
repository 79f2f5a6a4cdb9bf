//! Mock implementations for testing the poker coach agent.
//!
//! This crate provides network-free stand-ins for the pieces that normally
//! talk to external services:
//! - `EchoBrain` - Echoes messages back
//! - `FailingBrain` - Always fails, as if the provider were down
//! - `DelayedBrain` - Wraps another brain with artificial delay
//! - `ScriptedProvider` - A `ChatProvider` that plays back queued replies
//! - `RecordingExecutor` - Wraps a `ToolExecutor` and records every call
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, EchoBrain, InboundMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = EchoBrain::new();
//!
//!     let message = InboundMessage::in_session("table-1", "Hello!");
//!
//!     let response = brain.process(message).await?;
//!     println!("Response: {}", response.text);
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod recording;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use failing::FailingBrain;
pub use recording::RecordingExecutor;
pub use scripted::ScriptedProvider;
