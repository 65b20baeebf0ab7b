//! Service configuration, read once from the environment at startup.

use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_INFERENCE_URL: &str = "http://localhost:11434/api/chat";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://alerts.db";
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_BIND_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value `{value}`")]
    InvalidValue { key: &'static str, value: String },
}

/// Everything the handlers need to reach the two external systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Full URL of the chat-completion endpoint, e.g. `http://ollama:11434/api/chat`.
    pub inference_url: String,
    /// sqlx connection string of the alert store. Host, port, credentials and database
    /// name all live in here for network-backed drivers.
    pub database_url: String,
    pub bind_host: String,
    pub bind_port: u16,
}

impl AppConfig {
    /// Builds the config from `OLLAMA_URL`, `DATABASE_URL`, `BIND_HOST` and `BIND_PORT`,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            inference_url: env_or("OLLAMA_URL", DEFAULT_INFERENCE_URL),
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_host: env_or("BIND_HOST", DEFAULT_BIND_HOST),
            bind_port: parse_env("BIND_PORT", DEFAULT_BIND_PORT)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.bind_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            inference_url: DEFAULT_INFERENCE_URL.to_owned(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            bind_host: DEFAULT_BIND_HOST.to_owned(),
            bind_port: DEFAULT_BIND_PORT,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        }
        _ => Ok(default),
    }
}
