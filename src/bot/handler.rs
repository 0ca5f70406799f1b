use std::sync::Arc;

use serenity::all::{
    Command, Context, CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler,
    Guild, Interaction, Ready, UnavailableGuild,
};
use serenity::async_trait;

use crate::bot::extension;
use crate::scheduler::{self, Scheduler};
use crate::server;
use crate::status::BotStatus;

/// Discord bot event handler.
pub struct Handler {
    status: Arc<BotStatus>,
    scheduler: Scheduler,

    /// Shared outbound HTTP session, handed to command extensions.
    session: reqwest::Client,

    port: u16,
    serve_http: bool,
}

impl Handler {
    pub fn new(
        status: Arc<BotStatus>,
        scheduler: Scheduler,
        session: reqwest::Client,
        port: u16,
        serve_http: bool,
    ) -> Self {
        Self {
            status,
            scheduler,
            session,
            port,
            serve_http,
        }
    }

    fn refresh_guild_count(&self, ctx: &Context) {
        self.status.set_guild_count(ctx.cache.guild_count());
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord.
    ///
    /// The first ready event runs the one-time startup side effects: capture
    /// the bot identity, bind the health server when deployed, sync the
    /// application commands, and start the periodic loops. Later ready events
    /// are gateway reconnects and only refresh the guild count.
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.status.set_guild_count(ready.guilds.len());

        let identity = ready.user.tag();
        if !self.status.mark_ready(&identity) {
            tracing::info!("{} reconnected to Discord", identity);
            return;
        }

        tracing::info!("Connected as {}", identity);
        tracing::info!("Serving {} servers", ready.guilds.len());

        if self.serve_http {
            let status = self.status.clone();
            let port = self.port;
            tokio::spawn(async move {
                if let Err(e) = server::serve(status, port).await {
                    tracing::error!("Health server error: {}", e);
                }
            });
            tracing::info!("Health server started in background");
        }

        // A failing extension is skipped inside build_commands; the bot runs
        // without that feature set.
        let commands = extension::build_commands(extension::registry());
        if let Err(e) = Command::set_global_commands(&ctx.http, commands).await {
            tracing::error!("Failed to sync application commands: {}", e);
        }

        match scheduler::start_periodic_loops(&self.scheduler, ctx, self.status.clone()).await {
            Ok(_) => tracing::info!("Periodic loops started"),
            Err(e) => tracing::error!("Failed to start periodic loops: {}", e),
        }
    }

    /// Called when a guild becomes available or the bot joins a new guild.
    async fn guild_create(&self, ctx: Context, guild: Guild, _is_new: Option<bool>) {
        tracing::debug!("Guild available: {} ({})", guild.name, guild.id);
        self.refresh_guild_count(&ctx);
    }

    /// Called when a guild becomes unavailable or the bot is removed from it.
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        tracing::debug!("Guild removed: {}", incomplete.id);
        self.refresh_guild_count(&ctx);
    }

    /// Called when a slash command is invoked.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let Some(content) =
            extension::dispatch(&command.data.name, &self.status, &self.session).await
        else {
            tracing::warn!("Received unknown command: {}", command.data.name);
            return;
        };

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(content),
        );
        if let Err(e) = command.create_response(&ctx.http, response).await {
            tracing::error!("Failed to respond to {}: {}", command.data.name, e);
        }
    }
}
