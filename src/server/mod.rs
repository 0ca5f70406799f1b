//! Health endpoint server for the hosting platform's uptime monitor.
//!
//! A tiny Axum application exposing `/` and `/health`. It reports process
//! liveness and the connected bot's display name, not gateway health: once
//! bound it keeps answering for the lifetime of the process regardless of
//! transient Discord errors.
//!
//! The server is only bound when a deploy marker is present in the
//! environment and runs on its own spawned task so the gateway loop is never
//! starved. The only state shared with the gateway side is the read path to
//! the bot status.

pub mod router;
pub mod state;

use std::sync::Arc;

use crate::error::AppError;
use crate::status::BotStatus;
use state::AppState;

/// Binds the health endpoint server and serves it until the process exits.
pub async fn serve(status: Arc<BotStatus>, port: u16) -> Result<(), AppError> {
    let app = router::router().with_state(AppState::new(status));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Health server listening on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
