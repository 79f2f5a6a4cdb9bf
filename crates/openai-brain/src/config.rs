//! Configuration for OpenAiBrain.

use std::env;
use std::path::Path;
use std::time::Duration;

use brain_core::{BrainError, RetryPolicy};

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Instructions used when no prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a poker coach for beginner to intermediate Texas Hold'em players. \
You give clear, practical advice about hands, betting decisions and strategy, \
and you can also hold an ordinary conversation on other topics.

You cannot compute odds in your head, so you always use your tools for numbers. \
When a question involves a bet and a pot, first compute the pot odds with the pot_odds tool, \
then consult the poker_textbooks tool for how those odds should shape the decision, \
and only then recommend an action. Use the calculator for any other arithmetic and \
web_search for recent events or facts the textbooks do not cover.

Base your advice on what the tools return. If they do not answer the question, say so \
instead of making something up.";

/// Configuration for OpenAiBrain.
#[derive(Debug, Clone)]
pub struct OpenAiBrainConfig {
    /// OpenAI API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Chat model used for reasoning.
    pub model: String,

    /// Model used for embeddings.
    pub embedding_model: String,

    /// Optional system prompt.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum number of conversation turns to keep per session.
    pub max_history_turns: usize,

    /// Maximum reasoning steps per message before the agent gives up.
    pub max_iterations: usize,

    /// Time budget for one API attempt.
    pub request_timeout: Duration,

    /// Retries after a failed API attempt.
    pub max_retries: u32,
}

impl Default for OpenAiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            system_prompt: None,
            max_tokens: None,
            temperature: Some(0.1),
            max_history_turns: 10,
            max_iterations: 15,
            request_timeout: Duration::from_secs(60),
            max_retries: 1,
        }
    }
}

impl OpenAiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Chat model (default: gpt-3.5-turbo)
    /// - `OPENAI_EMBEDDING_MODEL` - Embedding model (default: text-embedding-ada-002)
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: provider default)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: 0.1)
    /// - `OPENAI_TIMEOUT_SECS` - Per-attempt timeout (default: 60)
    /// - `OPENAI_MAX_RETRIES` - Retries after a failed attempt (default: 1)
    /// - `POKER_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `POKER_PROMPT_FILE` - Path to system prompt file (default: SYSTEM_PROMPT.md)
    /// - `AGENT_MAX_HISTORY_TURNS` - Max history turns per session (default: 10)
    /// - `AGENT_MAX_ITERATIONS` - Max reasoning steps per message (default: 15)
    ///
    /// System prompt priority:
    /// 1. `POKER_SYSTEM_PROMPT` env var (if set)
    /// 2. Contents of prompt file (if exists)
    /// 3. [`DEFAULT_SYSTEM_PROMPT`]
    pub fn from_env() -> Result<Self, BrainError> {
        let defaults = Self::default();

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BrainError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url = env::var("OPENAI_API_URL").unwrap_or(defaults.api_url);

        let model = env::var("OPENAI_MODEL").unwrap_or(defaults.model);

        let embedding_model =
            env::var("OPENAI_EMBEDDING_MODEL").unwrap_or(defaults.embedding_model);

        let system_prompt = if let Ok(prompt) = env::var("POKER_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file =
                env::var("POKER_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file).or_else(|| Some(DEFAULT_SYSTEM_PROMPT.to_string()))
        };

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let max_history_turns = env::var("AGENT_MAX_HISTORY_TURNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_history_turns);

        let max_iterations = env::var("AGENT_MAX_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_iterations);

        let request_timeout = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let max_retries = env::var("OPENAI_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_retries);

        Ok(Self {
            api_url,
            api_key,
            model,
            embedding_model,
            system_prompt,
            max_tokens,
            temperature,
            max_history_turns,
            max_iterations,
            request_timeout,
            max_retries,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiBrainConfigBuilder {
        OpenAiBrainConfigBuilder::default()
    }

    /// Retry policy for API calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_timeout(self.request_timeout)
            .with_max_retries(self.max_retries)
    }
}

/// Builder for OpenAiBrainConfig.
#[derive(Debug, Default)]
pub struct OpenAiBrainConfigBuilder {
    config: OpenAiBrainConfig,
}

impl OpenAiBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the chat model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the embedding model.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding_model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the max history turns. Zero disables history.
    pub fn max_history_turns(mut self, turns: usize) -> Self {
        self.config.max_history_turns = turns;
        self
    }

    /// Set the max reasoning steps per message.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.config.max_iterations = iterations.max(1);
        self
    }

    /// Set the per-attempt timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the retries after a failed attempt.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Load system prompt from a file.
    ///
    /// If the file exists and is non-empty, sets the system prompt.
    pub fn load_prompt_file(mut self, path: impl AsRef<Path>) -> Self {
        if let Some(prompt) = load_prompt_file(path) {
            self.config.system_prompt = Some(prompt);
        }
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiBrainConfig {
        self.config
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
