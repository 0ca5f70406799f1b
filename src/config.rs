use crate::error::{AppError, ConfigError};

/// Default bind port for the health endpoint server.
pub const DEFAULT_PORT: u16 = 10000;

/// Runtime configuration resolved from the environment.
pub struct Config {
    /// Discord bot token. Startup aborts before any connection attempt when
    /// this is missing.
    pub token: String,

    /// Bind port for the health endpoint server.
    pub port: u16,

    /// Whether to bind the health endpoint server at all. True when a hosting
    /// deploy marker is present (`RENDER` or an assigned `PORT`).
    pub serve_http: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let token = get("TOKEN").ok_or_else(|| ConfigError::MissingEnvVar("TOKEN".to_string()))?;

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
                name: "PORT".to_string(),
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let serve_http = get("RENDER").is_some() || get("PORT").is_some();

        Ok(Self {
            token,
            port,
            serve_http,
        })
    }
}
