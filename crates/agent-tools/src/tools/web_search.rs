//! Web search through the Google Custom Search JSON API.

use async_trait::async_trait;
use brain_core::RetryPolicy;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::PokerToolsConfig;
use crate::error::ToolError;
use crate::input::{SearchQuery, WEB_SEARCH};
use crate::tool::{Tool, ToolArgs, ToolOutput};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Returned when a search has no results.
pub const NO_RESULTS_MESSAGE: &str = "No good Google Search result was found.";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Web search tool for current events and facts outside the textbooks.
///
/// # Parameters
///
/// - `query` (required): The search query.
pub struct WebSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    result_count: u8,
    retry: RetryPolicy,
}

impl WebSearch {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: CUSTOM_SEARCH_URL.to_string(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            result_count: 10,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &PokerToolsConfig) -> Self {
        Self::new(config.google_api_key.clone(), config.google_cse_id.clone())
            .with_result_count(config.search_result_count)
            .with_retry(config.retry_policy())
    }

    /// Number of results to request; the API allows 1 to 10.
    pub fn with_result_count(mut self, count: u8) -> Self {
        self.result_count = count.clamp(1, 10);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Override the API endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, ToolError> {
        let num = self.result_count.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
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

/// One line per result: `title: snippet (link)`.
fn format_results(items: &[SearchItem]) -> String {
    if items.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }
    items
        .iter()
        .map(|item| {
            let snippet = item.snippet.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{}: {} ({})", item.title.trim(), snippet, item.link)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        WEB_SEARCH
    }

    fn description(&self) -> &str {
        "Searches the web with Google. Use it for recent events, tournament results, \
         players, or anything the poker textbooks cannot answer. Input is a search query."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let SearchQuery { query } = args.decode()?;
        if query.trim().is_empty() {
            return Err(ToolError::MalformedInput("query must not be empty".to_string()));
        }

        debug!("Searching the web for: {}", query);

        let response = self
            .retry
            .run("google custom search", || self.search(&query))
            .await?;

        debug!("Search returned {} results", response.items.len());
        Ok(ToolOutput::success(format_results(&response.items)))
    }

    fn bounds_own_calls(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_results() {
        let response: SearchResponse = serde_json::from_value(json!({
            "kind": "customsearch#search",
            "items": [
                {
                    "title": "2023 WSOP Main Event",
                    "link": "https://example.com/wsop",
                    "snippet": "Daniel Weinman won\nthe Main Event."
                },
                {
                    "title": "Poker news",
                    "link": "https://example.com/news",
                    "snippet": "Latest results."
                }
            ]
        }))
        .unwrap();

        assert_eq!(
            format_results(&response.items),
            "2023 WSOP Main Event: Daniel Weinman won the Main Event. (https://example.com/wsop)\n\
             Poker news: Latest results. (https://example.com/news)"
        );
    }

    #[test]
    fn test_no_results() {
        let response: SearchResponse =
            serde_json::from_value(json!({"kind": "customsearch#search"})).unwrap();
        assert_eq!(format_results(&response.items), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_result_count_is_clamped() {
        assert_eq!(WebSearch::new("k", "cx").with_result_count(0).result_count, 1);
        assert_eq!(WebSearch::new("k", "cx").with_result_count(50).result_count, 10);
    }

    #[tokio::test]
    async fn test_missing_query() {
        let result = WebSearch::new("k", "cx")
            .execute(ToolArgs::new(HashMap::new()))
            .await;
        assert!(matches!(result, Err(ToolError::MalformedInput(_))));
    }
}
