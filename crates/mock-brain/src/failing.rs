//! A brain that always fails.

use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

/// Fails every message with a fixed error.
///
/// Defaults to [`BrainError::ProviderUnavailable`], the error a brain
/// reports once retries against its provider are exhausted.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    error: fn() -> BrainError,
}

impl FailingBrain {
    pub fn new() -> Self {
        Self {
            error: || BrainError::ProviderUnavailable("mock provider is down".to_string()),
        }
    }

    /// Fail with the error built by `error` instead.
    pub fn with_error(error: fn() -> BrainError) -> Self {
        Self { error }
    }
}

impl Default for FailingBrain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn process(&self, _message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        Err((self.error)())
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
