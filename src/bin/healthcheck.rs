//! External health probe for the bot's HTTP endpoint.
//!
//! Performs a single GET against `<BOT_URL>/health` and reports the result
//! through the process exit code: 0 when the bot answered 200, 1 on any
//! non-200 status, connection failure, or timeout. No retries; an external
//! monitor or cron re-invokes this on its own schedule.

use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;

const DEFAULT_BOT_URL: &str = "http://localhost:10000";
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    let base_url =
        std::env::var("BOT_URL").unwrap_or_else(|_| DEFAULT_BOT_URL.to_string());

    println!(
        "Checking bot health at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    match probe(&base_url).await {
        Ok(payload) => {
            println!("Bot is healthy: {payload}");
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            println!("{diagnostic}");
            ExitCode::FAILURE
        }
    }
}

/// Probes the health endpoint once, returning the decoded payload or a
/// printable diagnostic.
async fn probe(base_url: &str) -> Result<String, String> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(|e| format!("Health check error: {e}"))?;

    let response = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .map_err(|e| format!("Cannot connect to bot: {e}"))?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(format!("Bot health check failed: {}", status.as_u16()));
    }

    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| format!("Health check error: {e}"))?;

    Ok(payload.to_string())
}
