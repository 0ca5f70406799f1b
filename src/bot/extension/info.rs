//! Informational slash commands answered from the shared bot status.

use std::time::Duration;

use serenity::all::CreateCommand;

use crate::error::AppError;
use crate::status::BotStatus;

pub fn commands() -> Result<Vec<CreateCommand>, AppError> {
    Ok(vec![
        CreateCommand::new("ping").description("Check that the bot is responsive"),
        CreateCommand::new("uptime").description("Show how long the bot has been online"),
        CreateCommand::new("serverinfo").description("Show how many servers the bot serves"),
    ])
}

/// Answers one of this extension's commands, or `None` for a command it does
/// not own. The session is the seam for commands that need outbound HTTP;
/// none of the current ones do.
pub async fn respond(
    command: &str,
    status: &BotStatus,
    _session: &reqwest::Client,
) -> Option<String> {
    match command {
        "ping" => Some("Pong!".to_string()),
        "uptime" => Some(format!("Online for {}", format_uptime(status.uptime()))),
        "serverinfo" => Some(format!(
            "{} is serving {} servers",
            status.name(),
            status.guild_count()
        )),
        _ => None,
    }
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the ping command reply.
    #[tokio::test]
    async fn ping_replies_pong() {
        let status = BotStatus::new();
        let session = reqwest::Client::new();

        let reply = respond("ping", &status, &session).await;
        assert_eq!(reply.as_deref(), Some("Pong!"));
    }

    /// Tests that serverinfo reflects the resolved identity and guild count.
    #[tokio::test]
    async fn serverinfo_reflects_status() {
        let status = BotStatus::new();
        status.mark_ready("InfoBot#1234");
        status.set_guild_count(7);
        let session = reqwest::Client::new();

        let reply = respond("serverinfo", &status, &session).await.unwrap();
        assert_eq!(reply, "InfoBot#1234 is serving 7 servers");
    }

    /// Tests uptime formatting across unit boundaries.
    #[test]
    fn formats_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(61)), "0h 1m 1s");
        assert_eq!(format_uptime(Duration::from_secs(3723)), "1h 2m 3s");
    }
}
