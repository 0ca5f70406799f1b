//! Discord bot integration: client construction, gateway event handling, and
//! the command extension table.
//!
//! The bot owns the process lifecycle. Connecting to the gateway is the
//! blocking call in `main`; everything else (health server, periodic loops)
//! is launched from the ready handler once the connection is acknowledged.
//!
//! # Gateway intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive events about guild availability and removal
//! - `GUILD_MESSAGES` - Receive events about messages in guilds

pub mod extension;
pub mod handler;
pub mod start;
