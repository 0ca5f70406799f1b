use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::server::state::AppState;

/// Payload returned by `GET /health`.
#[derive(Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub bot: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

/// Plain-text operational banner for `GET /`.
async fn home(State(state): State<AppState>) -> String {
    format!("Bot {} is operational", state.status.name())
}

/// Structured health payload for `GET /health`.
///
/// Always reports healthy: answering at all is the signal. The bot field
/// carries the placeholder identity until the first ready event.
async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "healthy",
        bot: state.status.name(),
    })
}
