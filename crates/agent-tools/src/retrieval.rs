//! Passage retrieval from the poker textbook index.
//!
//! Questions are embedded with an [`Embedder`] and matched against a
//! Pinecone index whose records carry the passage text in their metadata.

use std::sync::Arc;

use async_trait::async_trait;
use brain_core::{Embedder, RetryPolicy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::PokerToolsConfig;
use crate::error::ToolError;

/// Metadata key holding the passage text.
pub const TEXT_METADATA_KEY: &str = "text";

/// Metadata key holding the passage's source document, when present.
pub const SOURCE_METADATA_KEY: &str = "source";

/// Pinecone data-plane API version.
const PINECONE_API_VERSION: &str = "2024-07";

/// A passage returned for a question.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub id: String,
    pub score: f32,
    pub text: String,
    pub source: Option<String>,
}

/// Finds the passages most relevant to a question.
#[async_trait]
pub trait PassageRetriever: Send + Sync {
    /// Return up to `top_k` passages, best match first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, ToolError>;
}

/// Summary of the index, used as a startup probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    #[serde(default)]
    pub dimension: Option<u32>,
    #[serde(default)]
    pub total_vector_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

impl QueryMatch {
    /// Matches without passage text are skipped.
    fn into_passage(self) -> Option<Passage> {
        let metadata = self.metadata?;
        let text = metadata.get(TEXT_METADATA_KEY)?.as_str()?.trim().to_string();
        if text.is_empty() {
            return None;
        }
        let source = metadata
            .get(SOURCE_METADATA_KEY)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        Some(Passage {
            id: self.id,
            score: self.score,
            text,
            source,
        })
    }
}

/// [`PassageRetriever`] backed by a Pinecone index.
pub struct PineconeRetriever {
    client: reqwest::Client,
    embedder: Arc<dyn Embedder>,
    host: String,
    api_key: String,
    namespace: Option<String>,
    retry: RetryPolicy,
}

impl PineconeRetriever {
    /// Create a retriever for the index at `host`.
    pub fn new(embedder: Arc<dyn Embedder>, host: &str, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            embedder,
            host: normalize_host(host),
            api_key: api_key.into(),
            namespace: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a retriever from the tool configuration.
    pub fn from_config(embedder: Arc<dyn Embedder>, config: &PokerToolsConfig) -> Self {
        let mut retriever = Self::new(
            embedder,
            &config.pinecone_index_host,
            config.pinecone_api_key.clone(),
        )
        .with_retry(config.retry_policy());
        retriever.namespace = config.pinecone_namespace.clone();
        retriever
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL of the index.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch index statistics; fails if the index is unreachable or the key is rejected.
    pub async fn describe(&self) -> Result<IndexStats, ToolError> {
        let url = format!("{}/describe_index_stats", self.host);
        let stats: IndexStats = self
            .retry
            .run("pinecone describe_index_stats", || {
                self.post_json(&url, Value::Object(Map::new()))
            })
            .await?;

        info!(
            "Pinecone index {} reachable: {} vectors, dimension {:?}",
            self.host, stats.total_vector_count, stats.dimension
        );
        Ok(stats)
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<QueryResponse, ToolError> {
        let url = format!("{}/query", self.host);
        let body = serde_json::to_value(QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace: self.namespace.as_deref(),
        })
        .map_err(|e| ToolError::ExecutionFailed(format!("Failed to encode query: {}", e)))?;

        self.retry
            .run("pinecone query", || self.post_json(&url, body.clone()))
            .await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: Value,
    ) -> Result<T, ToolError> {
        let response = self
            .client
            .post(url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ToolError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PassageRetriever for PineconeRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, ToolError> {
        let vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| ToolError::BrainError(format!("Failed to embed query: {}", e)))?;

        debug!(
            "Querying {} for top {} passages ({}-dim vector)",
            self.host,
            top_k,
            vector.len()
        );

        let response = self.query(&vector, top_k).await?;
        let passages: Vec<Passage> = response
            .matches
            .into_iter()
            .filter_map(QueryMatch::into_passage)
            .collect();

        debug!("Retrieved {} passages", passages.len());
        Ok(passages)
    }
}

/// Accept hosts with or without a scheme and trailing slash.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
