//! Configuration for the retrieval and search tools.

use std::env;
use std::time::Duration;

use brain_core::RetryPolicy;

use crate::error::ToolError;

/// Credentials and limits for the tools that call external services.
#[derive(Debug, Clone)]
pub struct PokerToolsConfig {
    /// Pinecone API key.
    pub pinecone_api_key: String,

    /// Host of the Pinecone index holding the textbook passages.
    pub pinecone_index_host: String,

    /// Optional Pinecone namespace.
    pub pinecone_namespace: Option<String>,

    /// Number of passages retrieved per question.
    pub retrieval_top_k: usize,

    /// Google API key for Custom Search.
    pub google_api_key: String,

    /// Custom Search engine id (`cx`).
    pub google_cse_id: String,

    /// Number of search results requested (1-10).
    pub search_result_count: u8,

    /// Time budget for one attempt of a tool call.
    pub tool_timeout: Duration,

    /// Retries after a failed tool attempt.
    pub tool_max_retries: u32,
}

impl Default for PokerToolsConfig {
    fn default() -> Self {
        Self {
            pinecone_api_key: String::new(),
            pinecone_index_host: String::new(),
            pinecone_namespace: None,
            retrieval_top_k: 5,
            google_api_key: String::new(),
            google_cse_id: String::new(),
            search_result_count: 10,
            tool_timeout: Duration::from_secs(30),
            tool_max_retries: 1,
        }
    }
}

impl PokerToolsConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `PINECONE_API_KEY`
    /// - `PINECONE_INDEX_HOST`
    /// - `GOOGLE_API_KEY`
    /// - `GOOGLE_CSE_ID`
    ///
    /// Optional environment variables:
    /// - `PINECONE_NAMESPACE` - Index namespace (default: none)
    /// - `RETRIEVAL_TOP_K` - Passages per question (default: 5)
    /// - `SEARCH_RESULT_COUNT` - Search results, clamped to 1-10 (default: 10)
    /// - `TOOL_TIMEOUT_SECS` - Per-attempt timeout (default: 30)
    /// - `TOOL_MAX_RETRIES` - Retries after a failed attempt (default: 1)
    pub fn from_env() -> Result<Self, ToolError> {
        let defaults = Self::default();

        let pinecone_namespace = env::var("PINECONE_NAMESPACE")
            .ok()
            .filter(|ns| !ns.trim().is_empty());

        let retrieval_top_k = env::var("RETRIEVAL_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|k: &usize| *k > 0)
            .unwrap_or(defaults.retrieval_top_k);

        let search_result_count = env::var("SEARCH_RESULT_COUNT")
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
            .map(|n| n.clamp(1, 10))
            .unwrap_or(defaults.search_result_count);

        let tool_timeout = env::var("TOOL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.tool_timeout);

        let tool_max_retries = env::var("TOOL_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.tool_max_retries);

        Ok(Self {
            pinecone_api_key: required("PINECONE_API_KEY")?,
            pinecone_index_host: required("PINECONE_INDEX_HOST")?,
            pinecone_namespace,
            retrieval_top_k,
            google_api_key: required("GOOGLE_API_KEY")?,
            google_cse_id: required("GOOGLE_CSE_ID")?,
            search_result_count,
            tool_timeout,
            tool_max_retries,
        })
    }

    /// Retry policy for calls made by the tools.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_timeout(self.tool_timeout)
            .with_max_retries(self.tool_max_retries)
    }
}

fn required(name: &str) -> Result<String, ToolError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ToolError::Configuration(format!("{} not set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 9] = [
        "PINECONE_API_KEY",
        "PINECONE_INDEX_HOST",
        "PINECONE_NAMESPACE",
        "RETRIEVAL_TOP_K",
        "GOOGLE_API_KEY",
        "GOOGLE_CSE_ID",
        "SEARCH_RESULT_COUNT",
        "TOOL_TIMEOUT_SECS",
        "TOOL_MAX_RETRIES",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn set_required() {
        env::set_var("PINECONE_API_KEY", "pc-key");
        env::set_var("PINECONE_INDEX_HOST", "poker-books-abc.svc.pinecone.io");
        env::set_var("GOOGLE_API_KEY", "g-key");
        env::set_var("GOOGLE_CSE_ID", "cse-id");
    }

    #[test]
    fn test_from_env_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        set_required();

        let config = PokerToolsConfig::from_env().unwrap();
        assert_eq!(config.pinecone_api_key, "pc-key");
        assert_eq!(config.pinecone_namespace, None);
        assert_eq!(config.retrieval_top_k, 5);
        assert_eq!(config.search_result_count, 10);
        assert_eq!(config.tool_timeout, Duration::from_secs(30));
        assert_eq!(config.retry_policy().max_retries, 1);

        clear_env();
    }

    #[test]
    fn test_from_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        set_required();
        env::set_var("PINECONE_NAMESPACE", "books");
        env::set_var("RETRIEVAL_TOP_K", "3");
        env::set_var("SEARCH_RESULT_COUNT", "25");
        env::set_var("TOOL_TIMEOUT_SECS", "5");
        env::set_var("TOOL_MAX_RETRIES", "0");

        let config = PokerToolsConfig::from_env().unwrap();
        assert_eq!(config.pinecone_namespace.as_deref(), Some("books"));
        assert_eq!(config.retrieval_top_k, 3);
        assert_eq!(config.search_result_count, 10);
        assert_eq!(config.retry_policy().timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.retry_policy().max_retries, 0);

        clear_env();
    }

    #[test]
    fn test_from_env_missing_credentials() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("PINECONE_API_KEY", "pc-key");

        let result = PokerToolsConfig::from_env();
        match result {
            Err(ToolError::Configuration(msg)) => assert!(msg.contains("PINECONE_INDEX_HOST")),
            other => panic!("Expected configuration error, got {:?}", other),
        }

        clear_env();
    }
}
