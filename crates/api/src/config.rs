//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Whether to insert demo data on startup.
    pub seed_demo: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MIXER_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:mixer.db?mode=rwc` |
    /// | `MIXER_SEED_DEMO` | Insert demo data on startup (`1`/`true`) | off |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("MIXER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:mixer.db?mode=rwc".to_string());

        let seed_demo = env::var("MIXER_SEED_DEMO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            addr,
            database_url,
            seed_demo,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MIXER_ADDR format")]
    InvalidAddr,
}
