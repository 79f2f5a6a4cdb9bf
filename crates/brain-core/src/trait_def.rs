//! The [`Brain`] trait.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::{InboundMessage, OutboundMessage};

/// Something that turns a prompt into an answer.
///
/// The HTTP layer holds one behind `Arc<dyn Brain>` and shares it across
/// requests; per-conversation state is keyed by `InboundMessage::session_id`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Answer `message`. An `Err` means no answer was produced.
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError>;

    fn name(&self) -> &str;

    async fn is_ready(&self) -> bool {
        true
    }
}
