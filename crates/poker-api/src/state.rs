//! Shared application state.

use std::sync::Arc;

use brain_core::Brain;

/// State handed to every handler.
///
/// The brain is shared by all requests; its per-session history is the
/// only mutable state.
#[derive(Clone)]
pub struct AppState {
    pub brain: Arc<dyn Brain>,
}

impl AppState {
    pub fn new(brain: Arc<dyn Brain>) -> Self {
        Self { brain }
    }
}
