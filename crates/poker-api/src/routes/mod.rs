//! HTTP routes.

mod landing;
mod response;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub use response::{PromptRequest, SESSION_HEADER};

/// `GET /` and `POST /response`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing::landing))
        .route("/response", post(response::respond))
}
