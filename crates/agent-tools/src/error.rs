//! Error types for tool operations.

use std::time::Duration;

use brain_core::Retryable;
use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The argument object could not be turned into the tool's input.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Arguments parsed, but violate the operation's preconditions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A provider answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Expression evaluation failed (calculator).
    #[error("Evaluation error: {0}")]
    EvalError(String),

    /// General execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Brain processing error.
    #[error("Brain error: {0}")]
    BrainError(String),

    /// A single attempt exceeded its time budget.
    #[error("Tool timed out after {0:?}")]
    Timeout(Duration),

    /// Retries against the tool's backend are exhausted.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Missing or invalid tool configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Retryable for ToolError {
    fn is_retryable(&self) -> bool {
        match self {
            ToolError::HttpError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ToolError::Api { status, .. } => *status == 429 || *status >= 500,
            ToolError::Timeout(_) => true,
            _ => false,
        }
    }

    fn timed_out(after: Duration) -> Self {
        ToolError::Timeout(after)
    }

    fn exhausted(self, attempts: u32) -> Self {
        ToolError::ProviderUnavailable(format!("{} (after {} attempts)", self, attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_not_retried() {
        assert!(!ToolError::MalformedInput("fifty,200".to_string()).is_retryable());
        assert!(!ToolError::InvalidArgument("0 + 0".to_string()).is_retryable());
        assert!(!ToolError::NotFound("dealer".to_string()).is_retryable());
    }

    #[test]
    fn test_backend_errors_are_retried() {
        assert!(ToolError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(ToolError::Api {
            status: 502,
            message: "bad gateway".to_string()
        }
        .is_retryable());
        assert!(!ToolError::Api {
            status: 403,
            message: "quota".to_string()
        }
        .is_retryable());
    }
}
