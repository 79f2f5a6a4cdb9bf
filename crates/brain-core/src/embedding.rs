//! Text embedding contract used by vector retrieval.

use async_trait::async_trait;

use crate::error::BrainError;

/// Turns text into a dense vector for similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single piece of text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, BrainError>;
}
