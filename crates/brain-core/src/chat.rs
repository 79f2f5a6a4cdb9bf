//! Chat provider abstraction.
//!
//! A [`ChatProvider`] is the reasoning backend of an agent: given the
//! conversation so far and the tools on offer, it either selects tool calls
//! or produces a final answer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrainError;
use crate::tools::ToolDefinition;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

impl ChatRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Tool => "tool",
        }
    }
}

/// A tool call selected by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call ID, echoed back with the result.
    pub id: String,
    /// Name of the tool to call.
    pub name: String,
    /// Arguments as the raw JSON text the model produced.
    pub arguments: String,
}

/// A single turn in a conversation with the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: Option<String>,
    /// Tool calls requested by the assistant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// ID of the call a tool message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(ChatRole::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(ChatRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(ChatRole::Assistant, content)
    }

    /// Create an assistant message that requests tool calls.
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content,
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// What the model decided to do with the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// Call these tools (in order) and come back with the results.
    ToolCalls {
        /// Optional reasoning text sent alongside the calls.
        content: Option<String>,
        calls: Vec<ToolCall>,
    },
    /// A final natural-language answer.
    Answer(String),
}

/// Trait for LLM backends that support function calling.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Ask the model for the next step.
    ///
    /// An empty `tools` slice means no tools are offered.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatReply, BrainError>;
}
