use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::session::{DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS};

/// Application configuration loaded from environment variables.
/// Everything is optional; a missing Gemini key only fails generation calls
/// and a missing database URL selects the in-memory store.
#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Idle time after which a session is evicted (`SESSION_IDLE_TTL_SECS`).
    pub session_idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_model: optional("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: optional("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            database_url: optional("DATABASE_URL"),
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            session_idle_ttl: match optional("SESSION_IDLE_TTL_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.trim()
                        .parse::<u64>()
                        .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
                ),
                None => DEFAULT_IDLE_TTL,
            },
            max_sessions: match optional("MAX_SESSIONS") {
                Some(max) => max
                    .trim()
                    .parse::<usize>()
                    .context("MAX_SESSIONS must be a positive integer")?,
                None => DEFAULT_MAX_SESSIONS,
            },
        })
    }
}

// Hand-written so the API key never reaches logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("session_idle_ttl", &self.session_idle_ttl)
            .field("max_sessions", &self.max_sessions)
            .finish()
    }
}
