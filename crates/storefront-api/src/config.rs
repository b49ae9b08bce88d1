//! Environment-driven server configuration.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::AppError;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Record store connection URL.
    pub redis_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Privileged user ids. Membership checks are pure set lookups; the set
    /// is injected here rather than compiled into logic.
    pub admin_ids: HashSet<i64>,
    /// Directory served for non-API paths.
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// `ADMIN_IDS` is a comma-separated list of integer user ids and may be
    /// empty or unset.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when `PORT` or `ADMIN_IDS` cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, AppError> {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let admin_ids = parse_admin_ids(&std::env::var("ADMIN_IDS").unwrap_or_default())?;
        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));

        Ok(Self {
            redis_url,
            host,
            port,
            admin_ids,
            static_dir,
        })
    }
}

fn parse_admin_ids(raw: &str) -> Result<HashSet<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|e| AppError::Config(format!("ADMIN_IDS entry {part:?} is invalid: {e}")))
        })
        .collect()
}
