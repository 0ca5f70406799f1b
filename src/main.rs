mod bot;
mod config;
mod error;
mod scheduler;
mod server;
mod status;

use std::sync::Arc;

use serenity::all::ShardManager;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::scheduler::Scheduler;
use crate::status::BotStatus;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Critical error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let status = Arc::new(BotStatus::new());
    let session = bot::start::setup_http_client()?;
    let scheduler = Scheduler::new().await?;

    let mut client =
        bot::start::build_client(&config, status.clone(), scheduler.clone(), session).await?;

    // Teardown runs from whichever side gets there first: the signal task or
    // the gateway loop returning with an error.
    let shard_manager = client.shard_manager.clone();
    let signal_status = status.clone();
    let signal_scheduler = scheduler.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Received shutdown signal, shutting down...");
        shutdown(&signal_status, &signal_scheduler, &shard_manager).await;
    });

    tracing::info!("Starting Discord bot...");
    if let Err(e) = client.start().await {
        tracing::error!("Discord client error: {}", e);
        shutdown(&status, &scheduler, &client.shard_manager).await;
        return Err(e.into());
    }

    shutdown(&status, &scheduler, &client.shard_manager).await;
    Ok(())
}

/// Best-effort teardown: set the shutdown flag, stop the periodic loops, and
/// tell the shards to disconnect. Safe to call more than once; only the first
/// call does any work. A failing step is logged and the rest still runs.
async fn shutdown(status: &BotStatus, scheduler: &Scheduler, shard_manager: &ShardManager) {
    if !status.begin_shutdown() {
        return;
    }

    tracing::info!("Shutting down bot...");

    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop scheduler: {}", e);
    }

    shard_manager.shutdown_all().await;
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
