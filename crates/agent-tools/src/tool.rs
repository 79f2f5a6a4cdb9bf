//! Tool trait definition and types.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use brain_core::Brain;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ToolError;

/// Arguments passed to a tool for execution.
#[derive(Clone)]
pub struct ToolArgs {
    /// Parameters as key-value pairs.
    pub params: HashMap<String, Value>,
    /// Optional brain for AI-assisted processing (e.g., answering from retrieved passages).
    pub brain: Option<Arc<dyn Brain>>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self { params, brain: None }
    }

    /// Create tool arguments with a brain for AI processing.
    pub fn with_brain(params: HashMap<String, Value>, brain: Arc<dyn Brain>) -> Self {
        Self {
            params,
            brain: Some(brain),
        }
    }

    /// Deserialize the parameters into the tool's typed input.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ToolError> {
        decode_params(&self.params)
    }
}

/// Deserialize a parameter map into a typed value.
///
/// Any shape mismatch is reported as [`ToolError::MalformedInput`].
pub(crate) fn decode_params<T: DeserializeOwned>(
    params: &HashMap<String, Value>,
) -> Result<T, ToolError> {
    let object: Map<String, Value> = params
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ToolError::MalformedInput(e.to_string()))
}

/// Output from a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result content (text or JSON).
    pub content: String,
    /// Whether the execution was successful.
    pub success: bool,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed output.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
        }
    }
}

/// A capability the agent can call by name.
///
/// The description is what the model reads when deciding whether to call
/// the tool, so it has to say precisely when and how to use it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Natural-language usage instructions for the model.
    fn description(&self) -> &str;

    /// JSON Schema of the argument object.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;

    /// Whether every external call the tool makes already carries its own
    /// timeout and retry. Such tools are run once, with no outer budget.
    fn bounds_own_calls(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Query {
        query: String,
    }

    #[test]
    fn test_decode_typed_params() {
        let mut params = HashMap::new();
        params.insert("query".to_string(), Value::String("blind steal".to_string()));

        let query: Query = ToolArgs::new(params).decode().unwrap();
        assert_eq!(query.query, "blind steal");
    }

    #[test]
    fn test_decode_missing_field_is_malformed() {
        let result: Result<Query, _> = ToolArgs::new(HashMap::new()).decode();
        match result {
            Err(ToolError::MalformedInput(msg)) => assert!(msg.contains("query")),
            other => panic!("Expected MalformedInput, got {:?}", other.map(|q| q.query)),
        }
    }
}
