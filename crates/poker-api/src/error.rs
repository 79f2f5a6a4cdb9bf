//! Error types for the HTTP layer and startup.

use std::net::AddrParseError;

use agent_tools::ToolError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brain_core::BrainError;
use thiserror::Error;
use tracing::{error, warn};

/// Failure to configure or start the service. Fatal before serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid POKER_API_ADDR {addr:?}: {source}")]
    InvalidAddr {
        addr: String,
        source: AddrParseError,
    },

    #[error("brain configuration: {0}")]
    Brain(#[from] BrainError),

    #[error("tool configuration: {0}")]
    Tools(#[from] ToolError),
}

/// A request that could not be answered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Brain(#[from] BrainError),

    /// The session id cannot be echoed back in a response header.
    #[error("invalid session_id {0:?}: must be visible ASCII")]
    InvalidSession(String),
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidSession(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ApiError::Brain(BrainError::ProviderUnavailable(_)) => {
                (StatusCode::BAD_GATEWAY, "provider_unavailable")
            }
            ApiError::Brain(BrainError::Network(_)) | ApiError::Brain(BrainError::Api { .. }) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
            ApiError::Brain(BrainError::Timeout(_)) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            ApiError::Brain(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();
        if status.is_client_error() {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        } else {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "type": error_type
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status(error: BrainError) -> StatusCode {
        ApiError::from(error).status_and_type().0
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status(BrainError::ProviderUnavailable("down".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(BrainError::Network("reset".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(BrainError::Api {
                status: 401,
                message: "bad key".to_string()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(BrainError::Timeout(Duration::from_secs(60))),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status(BrainError::InvalidResponse("no choices".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidSession("a\nb".to_string()).status_and_type(),
            (StatusCode::BAD_REQUEST, "invalid_request")
        );
    }
}
