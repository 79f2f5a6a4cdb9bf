//! Per-session conversation history.
//!
//! Each session keeps its own bounded list of exchanges. The number of
//! tracked sessions is capped too, with least-recently-used eviction, so a
//! flood of fresh session IDs cannot grow memory without bound.

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::chat::{ChatMessage, ChatRole};

/// Default maximum number of sessions to track before LRU eviction.
const DEFAULT_MAX_SESSIONS: usize = 10000;

/// A single retained message.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryMessage {
    /// `User` or `Assistant`.
    pub role: ChatRole,
    pub content: String,
}

impl HistoryMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<HistoryMessage> for ChatMessage {
    fn from(message: HistoryMessage) -> Self {
        match message.role {
            ChatRole::User => ChatMessage::user(message.content),
            _ => ChatMessage::assistant(message.content),
        }
    }
}

/// Session-scoped conversation history with LRU eviction.
///
/// Only the user's prompt and the final answer of each exchange are kept;
/// intermediate tool traffic lives and dies with the request.
///
/// # Example
///
/// ```rust
/// use brain_core::ConversationHistory;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let history = ConversationHistory::new(5); // Keep 5 turns
///
///     history.add_exchange("session-a", "I have AK", "Raise.").await;
///     history.add_exchange("session-a", "They 3-bet", "Call.").await;
///
///     let messages = history.get("session-a").await;
///     assert_eq!(messages.len(), 4); // 2 turns = 4 messages
/// }
/// ```
#[derive(Debug)]
pub struct ConversationHistory {
    /// Session ID to its messages, oldest session first.
    histories: RwLock<IndexMap<String, Vec<HistoryMessage>>>,
    /// Maximum number of turns (user + assistant pairs) per session.
    max_turns: usize,
    max_sessions: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ConversationHistory {
    /// Create a history keeping `max_turns` exchanges per session.
    ///
    /// `max_turns == 0` disables retention entirely.
    pub fn new(max_turns: usize) -> Self {
        Self::with_limits(max_turns, DEFAULT_MAX_SESSIONS)
    }

    /// Create a history with custom limits.
    ///
    /// # Arguments
    ///
    /// * `max_turns` - Maximum number of turns (user + assistant pairs) per session
    /// * `max_sessions` - Maximum number of sessions to track before LRU eviction
    pub fn with_limits(max_turns: usize, max_sessions: usize) -> Self {
        Self {
            histories: RwLock::new(IndexMap::new()),
            max_turns,
            max_sessions,
        }
    }

    /// Get the history for a session, marking it as recently used.
    pub async fn get(&self, session_id: &str) -> Vec<HistoryMessage> {
        let mut histories = self.histories.write().await;

        match histories.shift_remove(session_id) {
            Some(entry) => {
                let result = entry.clone();
                histories.insert(session_id.to_string(), entry);
                result
            }
            None => Vec::new(),
        }
    }

    /// Record a completed exchange for a session.
    pub async fn add_exchange(&self, session_id: &str, user_msg: &str, assistant_msg: &str) {
        if self.max_turns == 0 {
            return;
        }

        let mut histories = self.histories.write().await;

        let mut history = histories.shift_remove(session_id).unwrap_or_default();
        history.push(HistoryMessage::user(user_msg));
        history.push(HistoryMessage::assistant(assistant_msg));

        let max_messages = self.max_turns * 2;
        if history.len() > max_messages {
            let excess = history.len() - max_messages;
            history.drain(0..excess);
        }

        histories.insert(session_id.to_string(), history);

        while histories.len() > self.max_sessions {
            histories.shift_remove_index(0);
        }
    }

    /// Forget a single session.
    pub async fn clear(&self, session_id: &str) {
        self.histories.write().await.shift_remove(session_id);
    }

    /// Forget every session.
    pub async fn clear_all(&self) {
        self.histories.write().await.clear();
    }

    /// Number of sessions currently tracked.
    pub async fn session_count(&self) -> usize {
        self.histories.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_get_history() {
        let history = ConversationHistory::new(5);

        history.add_exchange("s1", "I bet 50 into 200", "Pot odds are 0.2").await;
        history.add_exchange("s1", "And now?", "Call.").await;

        let messages = history.get("s1").await;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], HistoryMessage::user("I bet 50 into 200"));
        assert_eq!(messages[1], HistoryMessage::assistant("Pot odds are 0.2"));
    }

    #[tokio::test]
    async fn test_history_trimming() {
        let history = ConversationHistory::new(2);

        history.add_exchange("s1", "First", "Response 1").await;
        history.add_exchange("s1", "Second", "Response 2").await;
        history.add_exchange("s1", "Third", "Response 3").await;

        let messages = history.get("s1").await;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].content, "Second");
        assert_eq!(messages[3].content, "Response 3");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let history = ConversationHistory::new(5);

        history.add_exchange("alice", "Hello A", "Hi A!").await;
        history.add_exchange("bob", "Hello B", "Hi B!").await;

        let a = history.get("alice").await;
        let b = history.get("bob").await;
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(a[0].content, "Hello A");
        assert_eq!(b[0].content, "Hello B");
    }

    #[tokio::test]
    async fn test_zero_turns_keeps_nothing() {
        let history = ConversationHistory::new(0);
        history.add_exchange("s1", "Hello", "Hi!").await;

        assert!(history.get("s1").await.is_empty());
        assert_eq!(history.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_clear_session() {
        let history = ConversationHistory::new(5);

        history.add_exchange("s1", "Hello", "Hi!").await;
        history.add_exchange("s2", "Hey", "Hello!").await;
        history.clear("s1").await;

        assert!(history.get("s1").await.is_empty());
        assert_eq!(history.get("s2").await.len(), 2);

        history.clear_all().await;
        assert_eq!(history.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_lru_eviction_respects_access_order() {
        let history = ConversationHistory::with_limits(5, 3);

        history.add_exchange("s1", "Hello", "Hi!").await;
        history.add_exchange("s2", "Hello", "Hi!").await;
        history.add_exchange("s3", "Hello", "Hi!").await;

        // Touch s1 so s2 becomes the oldest.
        let _ = history.get("s1").await;
        history.add_exchange("s4", "Hello", "Hi!").await;

        assert_eq!(history.session_count().await, 3);
        assert!(history.get("s2").await.is_empty());
        assert!(!history.get("s1").await.is_empty());
        assert!(!history.get("s3").await.is_empty());
        assert!(!history.get("s4").await.is_empty());
    }

    #[test]
    fn test_history_message_into_chat_message() {
        let chat: ChatMessage = HistoryMessage::assistant("Fold.").into();
        assert_eq!(chat.role, ChatRole::Assistant);
        assert_eq!(chat.content.as_deref(), Some("Fold."));
    }
}
