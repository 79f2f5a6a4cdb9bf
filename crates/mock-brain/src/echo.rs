//! Answers with the prompt itself.

use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

/// Replies with the prompt text, optionally behind a fixed lead-in.
///
/// Lets the HTTP layer be exercised without a chat provider.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    lead: String,
}

impl EchoBrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// `EchoBrain::with_prefix("Coach: ")` answers `"hi"` with `"Coach: hi"`.
    pub fn with_prefix(lead: impl Into<String>) -> Self {
        Self { lead: lead.into() }
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        let mut answer = self.lead.clone();
        answer.push_str(&message.text);
        Ok(OutboundMessage::reply_to(&message, answer))
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_keeps_session() {
        let response = EchoBrain::new()
            .process(InboundMessage::in_session("table-1", "Pocket kings?"))
            .await
            .unwrap();

        assert_eq!(response.text, "Pocket kings?");
        assert_eq!(response.session_id.as_deref(), Some("table-1"));
    }

    #[tokio::test]
    async fn test_echo_with_lead_in() {
        let response = EchoBrain::with_prefix("Coach: ")
            .process(InboundMessage::stateless("fold"))
            .await
            .unwrap();

        assert_eq!(response.text, "Coach: fold");
        assert!(response.session_id.is_none());
    }

    #[tokio::test]
    async fn test_always_ready() {
        assert!(EchoBrain::new().is_ready().await);
    }
}
