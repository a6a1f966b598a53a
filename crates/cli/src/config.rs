//! Runtime settings.
//!
//! Environment variables supported (a `.env` file is read first when
//! present):
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite://users.db`)
//! - `BIND_ADDR`: address the API listens on (default: `0.0.0.0:8000`)
//! - `DB_MAX_CONNECTIONS`: pool ceiling (default: 10)
//! - `ENV`: deployment environment name, informational (default: `development`)
//! - `LOG_FORMAT`: `text` or `json` (default: `text`)
//!
//! Command-line flags take precedence over all of the above.

use anyhow::{bail, Context, Result};

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_ENVIRONMENT: &str = "ENV";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub environment: String,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to defaults for
    /// unset keys. Present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup(ENV_MAX_CONNECTIONS) {
            Some(raw) => {
                let value: u32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{ENV_MAX_CONNECTIONS}={raw:?} is not a number"))?;
                if value == 0 {
                    bail!("{ENV_MAX_CONNECTIONS} must be at least 1");
                }
                value
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_format = match lookup(ENV_LOG_FORMAT).as_deref().map(str::trim) {
            None | Some("") => LogFormat::Text,
            Some(f) if f.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(other) => bail!("{ENV_LOG_FORMAT}={other:?}: expected \"text\" or \"json\""),
        };

        Ok(Self {
            database_url: lookup(ENV_DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections,
            environment: lookup(ENV_ENVIRONMENT).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            log_format,
        })
    }
}
