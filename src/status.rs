//! Shared bot status readable from every execution context.
//!
//! The bot identity, shutdown flag, start time, and guild count are owned by a
//! single `BotStatus` value created at startup and shared behind an `Arc`. The
//! health server, the periodic loops, and the command extensions all read from
//! it; the only writers are the ready handler (identity, guild count) and the
//! shutdown path (shutdown flag).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Identity reported before the gateway handshake completes.
pub const DEFAULT_IDENTITY: &str = "Loading...";

/// Process-lifetime bot state shared between the gateway loop, the periodic
/// loops, and the health server.
pub struct BotStatus {
    /// Display name of the connected bot user. Always replaced whole.
    name: RwLock<String>,

    /// Set once when the first ready event arrives. Gates the one-time
    /// startup side effects so gateway reconnects do not repeat them.
    ready: AtomicBool,

    /// Monotonic shutdown flag, false -> true exactly once.
    shutdown: AtomicBool,

    /// Captured at construction, used to compute uptime.
    started_at: Instant,

    /// Mirror of the serenity cache's guild count.
    guilds: AtomicUsize,
}

impl BotStatus {
    pub fn new() -> Self {
        Self {
            name: RwLock::new(DEFAULT_IDENTITY.to_string()),
            ready: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            started_at: Instant::now(),
            guilds: AtomicUsize::new(0),
        }
    }

    /// Returns the current bot identity.
    pub fn name(&self) -> String {
        self.name
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Records the resolved identity on the first successful connection.
    ///
    /// Returns `true` only for the first caller; later calls (gateway
    /// reconnects) leave the identity untouched and return `false`.
    pub fn mark_ready(&self, name: &str) -> bool {
        if self
            .ready
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        let mut current = self
            .name
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = name.to_string();
        true
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Flips the shutdown flag. Returns `true` only for the caller that
    /// actually initiated shutdown, so teardown runs once.
    pub fn begin_shutdown(&self) -> bool {
        self.shutdown
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn set_guild_count(&self, count: usize) {
        self.guilds.store(count, Ordering::SeqCst);
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.load(Ordering::SeqCst)
    }
}

impl Default for BotStatus {
    fn default() -> Self {
        Self::new()
    }
}
