//! Inbound and outbound message types.

use serde::{Deserialize, Serialize};

/// A question addressed to a brain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Conversation session this message belongs to.
    ///
    /// `None` means the exchange is stateless: no history is read or kept.
    pub session_id: Option<String>,
    /// The user's text.
    pub text: String,
}

impl InboundMessage {
    /// Create a message that belongs to a session.
    pub fn in_session(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            text: text.into(),
        }
    }

    /// Create a one-off message with no conversation history.
    pub fn stateless(text: impl Into<String>) -> Self {
        Self {
            session_id: None,
            text: text.into(),
        }
    }
}

/// A brain's final answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Session the answer belongs to, copied from the inbound message.
    pub session_id: Option<String>,
    /// The answer text.
    pub text: String,
}

impl OutboundMessage {
    /// Create a reply to the given inbound message.
    pub fn reply_to(message: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            session_id: message.session_id.clone(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_keeps_session() {
        let inbound = InboundMessage::in_session("table-7", "Should I call?");
        let reply = OutboundMessage::reply_to(&inbound, "Yes.");
        assert_eq!(reply.session_id.as_deref(), Some("table-7"));
        assert_eq!(reply.text, "Yes.");
    }

    #[test]
    fn test_stateless_has_no_session() {
        let inbound = InboundMessage::stateless("What is a squeeze play?");
        let reply = OutboundMessage::reply_to(&inbound, "...");
        assert!(reply.session_id.is_none());
    }
}
