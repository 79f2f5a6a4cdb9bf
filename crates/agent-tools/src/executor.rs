//! ToolExecutor implementation backed by ToolRegistry.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use brain_core::{RetryPolicy, ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
use tracing::{debug, warn};

use crate::input::ToolInput;
use crate::ToolRegistry;

/// Default time budget for one attempt of a tool call.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Which tools may run, and how failures are retried.
#[derive(Debug, Clone)]
pub struct ToolPolicy {
    pub allowlist: Option<HashSet<String>>,
    pub retry: RetryPolicy,
}

impl Default for ToolPolicy {
    fn default() -> Self {
        Self {
            allowlist: None,
            retry: RetryPolicy::default().with_timeout(DEFAULT_TOOL_TIMEOUT),
        }
    }
}

impl ToolPolicy {
    pub fn allow_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowlist = self.allowlist.get_or_insert_with(HashSet::new);
        for tool in tools {
            allowlist.insert(tool.into());
        }
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Exposes a [`ToolRegistry`] to a brain as a [`ToolExecutor`].
///
/// Every failure, from a disallowed tool to an exhausted backend, comes
/// back as an error [`ToolResult`] rather than aborting the conversation.
pub struct RegistryToolExecutor {
    registry: Arc<ToolRegistry>,
    policy: ToolPolicy,
}

impl RegistryToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_policy(registry, ToolPolicy::default())
    }

    pub fn with_policy(registry: ToolRegistry, policy: ToolPolicy) -> Self {
        Self::from_shared(Arc::new(registry), policy)
    }

    pub fn from_shared(registry: Arc<ToolRegistry>, policy: ToolPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.registry.as_ref()
    }

    pub fn policy(&self) -> &ToolPolicy {
        &self.policy
    }

    fn is_allowed(&self, tool: &str) -> bool {
        match self.policy.allowlist {
            Some(ref allowlist) => allowlist.contains(tool),
            None => true,
        }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for RegistryToolExecutor {
    async fn execute(&self, request: ToolRequest) -> ToolResult {
        if !self.is_allowed(&request.name) || !self.registry.has_tool(&request.name) {
            warn!("Rejected call to unavailable tool '{}'", request.name);
            return ToolResult::error(&request.id, format!("Unknown tool: {}", request.name));
        }

        match ToolInput::from_call(&request.name, &request.arguments) {
            Ok(Some(input)) => debug!(
                "Tool call {}: {}",
                request.id,
                serde_json::to_string(&input).unwrap_or_default()
            ),
            Ok(None) => {}
            Err(error) => {
                warn!("Tool '{}' got malformed arguments: {}", request.name, error);
                return ToolResult::error(&request.id, error.to_string());
            }
        }

        // Tools that bound their own calls run once.
        let retry = match self.registry.get(&request.name) {
            Some(tool) if tool.bounds_own_calls() => RetryPolicy::none(),
            _ => self.policy.retry,
        };

        let outcome = retry
            .run(&request.name, || {
                self.registry
                    .execute(&request.name, request.arguments.clone())
            })
            .await;

        match outcome {
            Ok(output) if output.success => ToolResult::success(&request.id, output.content),
            Ok(output) => ToolResult::error(&request.id, output.content),
            Err(error) => {
                warn!("Tool '{}' failed: {}", request.name, error);
                ToolResult::error(&request.id, error.to_string())
            }
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .definitions()
            .into_iter()
            .filter(|d| self.is_allowed(&d.name))
            .collect()
    }
}
