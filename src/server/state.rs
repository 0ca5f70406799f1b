//! Application state shared across health endpoint handlers.
//!
//! The health server only ever reads the bot's shared status; the state is
//! initialised once when the server is bound and cloned per request through
//! Axum's state extraction.

use std::sync::Arc;

use crate::status::BotStatus;

/// State handed to every health endpoint handler.
///
/// Cheap to clone: the status is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Shared bot status, written by the gateway side and read here.
    pub status: Arc<BotStatus>,
}

impl AppState {
    pub fn new(status: Arc<BotStatus>) -> Self {
        Self { status }
    }
}
