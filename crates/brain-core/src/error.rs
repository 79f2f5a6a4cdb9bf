//! Error types for brain operations.

use std::time::Duration;

use thiserror::Error;

use crate::retry::Retryable;

/// Errors that can occur during brain processing.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The brain or one of its providers is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered with something we could not interpret.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A single attempt exceeded its time budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Retries are exhausted; the provider is treated as down for this request.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The message could not be processed.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}

impl Retryable for BrainError {
    fn is_retryable(&self) -> bool {
        match self {
            BrainError::Network(_) | BrainError::Timeout(_) => true,
            BrainError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    fn timed_out(after: Duration) -> Self {
        BrainError::Timeout(after)
    }

    fn exhausted(self, attempts: u32) -> Self {
        BrainError::ProviderUnavailable(format!("{} (after {} attempts)", self, attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(BrainError::Network("reset".to_string()).is_retryable());
        assert!(BrainError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(BrainError::Api {
            status: 503,
            message: "busy".to_string()
        }
        .is_retryable());
        assert!(BrainError::Api {
            status: 429,
            message: "slow down".to_string()
        }
        .is_retryable());
        assert!(!BrainError::Api {
            status: 401,
            message: "bad key".to_string()
        }
        .is_retryable());
        assert!(!BrainError::InvalidResponse("no choices".to_string()).is_retryable());
    }

    #[test]
    fn test_exhausted_becomes_provider_unavailable() {
        let err = BrainError::Network("connection refused".to_string()).exhausted(2);
        match err {
            BrainError::ProviderUnavailable(msg) => {
                assert!(msg.contains("connection refused"));
                assert!(msg.contains("2 attempts"));
            }
            other => panic!("Expected ProviderUnavailable, got {:?}", other),
        }
    }
}
