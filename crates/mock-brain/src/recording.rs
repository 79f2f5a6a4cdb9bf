//! A tool executor wrapper that records every call.

use brain_core::{async_trait, ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
use tokio::sync::Mutex;

/// Passes calls through to an inner [`ToolExecutor`] and keeps a log of
/// each request with the result it produced.
pub struct RecordingExecutor<E: ToolExecutor> {
    inner: E,
    calls: Mutex<Vec<(ToolRequest, ToolResult)>>,
}

impl<E: ToolExecutor> RecordingExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded calls, oldest first.
    pub async fn calls(&self) -> Vec<(ToolRequest, ToolResult)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl<E: ToolExecutor> ToolExecutor for RecordingExecutor<E> {
    async fn execute(&self, request: ToolRequest) -> ToolResult {
        let result = self.inner.execute(request.clone()).await;
        self.calls.lock().await.push((request, result.clone()));
        result
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.inner.definitions()
    }
}
