use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::scheduler::Scheduler;
use crate::status::BotStatus;

/// Builds the single shared outbound HTTP session.
///
/// One session exists per process: a bounded connection pool with redirects
/// disabled, created at startup and dropped when the process exits.
pub fn setup_http_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .pool_max_idle_per_host(5)
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// Builds the Discord client.
///
/// The returned client blocks the caller on `start`, so `main` drives it as
/// the primary loop. Startup side effects beyond connecting happen in the
/// ready handler.
pub async fn build_client(
    config: &Config,
    status: Arc<BotStatus>,
    scheduler: Scheduler,
    session: reqwest::Client,
) -> Result<Client, AppError> {
    // What events the bot will receive from the gateway.
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let handler = Handler::new(
        status,
        scheduler,
        session,
        config.port,
        config.serve_http,
    );

    let client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}
