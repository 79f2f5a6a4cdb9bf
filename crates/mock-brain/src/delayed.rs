//! Simulated provider latency.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

/// Holds every request for `latency` before handing it to `inner`.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    latency: Duration,
}

impl<B: Brain> DelayedBrain<B> {
    pub fn new(inner: B, latency: Duration) -> Self {
        Self { inner, latency }
    }

    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        tokio::time::sleep(self.latency).await;
        self.inner.process(message).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
