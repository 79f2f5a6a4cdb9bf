//! Tool registry for managing and executing tools.

use std::collections::HashMap;
use std::sync::Arc;

use brain_core::{Brain, ToolDefinition};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Ordered registry of tools.
///
/// Registration order is preserved and is the order in which tools are
/// offered to the model.
pub struct ToolRegistry {
    /// Registered tools by name, in registration order.
    tools: IndexMap<String, Arc<dyn Tool>>,
    /// Optional shared brain for tools that need AI processing.
    brain: Option<Arc<dyn Brain>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
            brain: None,
        }
    }

    /// Set the brain for AI-assisted tools.
    pub fn set_brain(&mut self, brain: Arc<dyn Brain>) {
        self.brain = Some(brain);
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it is replaced in place.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_shared(Arc::new(tool));
    }

    /// Register an already shared tool.
    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Registered tool names, in order.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool definitions for the model, in order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Execute a tool by name with the given parameters.
    ///
    /// The shared brain, if any, is handed to the tool.
    pub async fn execute(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!("Executing tool '{}' with {} params", name, params.len());

        let args = match self.brain {
            Some(ref brain) => ToolArgs::with_brain(params, brain.clone()),
            None => ToolArgs::new(params),
        };

        let result = tool.execute(args).await?;

        debug!(
            "Tool '{}' completed: success={}, content_len={}",
            name,
            result.success,
            result.content.len()
        );

        Ok(result)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
