//! Tool execution support for Brain implementations.
//!
//! A brain never calls a tool directly: it hands a [`ToolRequest`] to a
//! [`ToolExecutor`] and gets a [`ToolResult`] back. Failures are results too,
//! so a broken tool call becomes text the model can react to instead of an
//! aborted conversation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Description of a tool as offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the function.
    pub name: String,
    /// Natural-language guidance the model uses to decide when to call it.
    pub description: String,
    /// JSON Schema for the function parameters.
    pub parameters: Value,
}

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The tool call ID this result corresponds to.
    pub tool_call_id: String,
    /// The result content (will be sent back to the model).
    pub content: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
}

impl ToolResult {
    /// Create a successful tool result.
    pub fn success(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed tool result.
    pub fn error(tool_call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: format!("Error: {}", error.into()),
            success: false,
        }
    }
}

/// A request to execute a tool.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// Unique ID for this tool call.
    pub id: String,
    /// Name of the tool to execute.
    pub name: String,
    /// Arguments as a JSON object.
    pub arguments: HashMap<String, Value>,
}

impl ToolRequest {
    /// Parse arguments from the JSON text a model produced.
    ///
    /// Empty or whitespace-only argument text is treated as `{}`.
    pub fn from_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments_json: &str,
    ) -> Result<Self, serde_json::Error> {
        let arguments: HashMap<String, Value> = if arguments_json.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(arguments_json)?
        };
        Ok(Self {
            id: id.into(),
            name: name.into(),
            arguments,
        })
    }

    /// Get a string argument by name.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

/// Trait for executing tools called by a Brain.
///
/// # Example
///
/// ```ignore
/// use brain_core::{ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
///
/// struct Fold;
///
/// #[async_trait]
/// impl ToolExecutor for Fold {
///     async fn execute(&self, request: ToolRequest) -> ToolResult {
///         ToolResult::success(&request.id, "folded")
///     }
///
///     fn definitions(&self) -> Vec<ToolDefinition> {
///         vec![]
///     }
/// }
/// ```
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool and return the result.
    async fn execute(&self, request: ToolRequest) -> ToolResult;

    /// Definitions of the tools this executor supports, in offer order.
    fn definitions(&self) -> Vec<ToolDefinition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("call-123", "0.2");
        assert!(result.success);
        assert_eq!(result.tool_call_id, "call-123");
        assert_eq!(result.content, "0.2");
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("call-456", "Malformed input");
        assert!(!result.success);
        assert_eq!(result.content, "Error: Malformed input");
    }

    #[test]
    fn test_tool_request_parsing() {
        let request = ToolRequest::from_call(
            "id-1",
            "web_search",
            r#"{"query": "AK offsuit preflop equity"}"#,
        )
        .unwrap();

        assert_eq!(request.name, "web_search");
        assert_eq!(request.get_string("query"), Some("AK offsuit preflop equity"));
    }

    #[test]
    fn test_tool_request_empty_arguments() {
        let request = ToolRequest::from_call("id-1", "calculator", "  ").unwrap();
        assert!(request.arguments.is_empty());
    }

    #[test]
    fn test_tool_request_invalid_json() {
        assert!(ToolRequest::from_call("id-1", "pot_odds", "50,200").is_err());
    }
}
