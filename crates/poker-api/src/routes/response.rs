//! `POST /response`: ask the coach.

use axum::extract::{Json, State};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use brain_core::InboundMessage;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response header carrying the session the answer belongs to.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    /// Continue an earlier conversation; a new session is started when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Answer the prompt; the body is the answer as a JSON string.
pub async fn respond(
    State(state): State<AppState>,
    Json(payload): Json<PromptRequest>,
) -> Result<Response, ApiError> {
    let session_id = payload
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let session_header = HeaderValue::from_str(&session_id)
        .map_err(|_| ApiError::InvalidSession(session_id.clone()))?;

    info!(session = %session_id, prompt_chars = payload.prompt.chars().count(), "Request received");
    debug!(session = %session_id, prompt = %payload.prompt, "Prompt");

    let reply = state
        .brain
        .process(InboundMessage::in_session(session_id.clone(), payload.prompt))
        .await?;

    info!(session = %session_id, answer_chars = reply.text.chars().count(), "Answered");

    let mut response = Json(reply.text).into_response();
    response.headers_mut().insert(SESSION_HEADER, session_header);
    Ok(response)
}
