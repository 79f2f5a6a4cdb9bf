//! HTTP client for the OpenAI chat completion and embedding endpoints.

use brain_core::{
    async_trait, BrainError, ChatMessage, ChatProvider, ChatReply, Embedder, RetryPolicy,
    ToolDefinition,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, EmbeddingRequest, EmbeddingResponse,
    WireMessage, WireTool,
};
use crate::config::OpenAiBrainConfig;

/// OpenAI API client.
///
/// Implements [`ChatProvider`] for reasoning and [`Embedder`] for
/// retrieval. Every request runs under the configured [`RetryPolicy`].
pub struct OpenAiClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    embedding_model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    retry: RetryPolicy,
}

impl OpenAiClient {
    /// Create a client from the brain configuration.
    pub fn new(config: &OpenAiBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("OpenAI API key is empty".to_string()));
        }

        let http = Client::builder()
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            retry: config.retry_policy(),
        })
    }

    /// Chat model used for completions.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// POST `body` to `path` and decode the JSON response.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BrainError> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            return Err(BrainError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatReply, BrainError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.iter().map(WireTool::from).collect())
            },
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "Sending chat completion: {} messages, {} tools",
            request.messages.len(),
            tools.len()
        );

        let completion: ChatCompletionResponse = self
            .retry
            .run("openai chat completion", || {
                self.post("/v1/chat/completions", &request)
            })
            .await?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BrainError::InvalidResponse("No choices in response".to_string()))?;

        debug!("Completion finished: {:?}", choice.finish_reason);
        Ok(ChatReply::from(choice.message))
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, BrainError> {
        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: text,
        };

        let response: EmbeddingResponse = self
            .retry
            .run("openai embedding", || self.post("/v1/embeddings", &request))
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| BrainError::InvalidResponse("No embedding in response".to_string()))
    }
}
