use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_RELAY_HOST: &str = "127.0.0.1";
pub const DEFAULT_RELAY_PORT: u16 = 25;
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Top-level config (meetman.toml + MEETMAN_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetmanConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mail: MailConfig,
    /// IANA timezone name used for all local-date rendering and expiry
    /// comparisons. Timestamps in the store stay timezone-naive.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for MeetmanConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            mail: MailConfig::default(),
            timezone: default_timezone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the meetings SQLite file. The CLI positional argument takes
    /// precedence over this value.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Hostname of the outbound relay. Plain SMTP, no TLS or auth — the
    /// relay is expected to be a local trusted MTA.
    #[serde(default = "default_relay_host")]
    pub host: String,
    #[serde(default = "default_relay_port")]
    pub port: u16,
    /// From address on every outbound message.
    #[serde(default = "default_sender")]
    pub sender: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: default_relay_host(),
            port: default_relay_port(),
            sender: default_sender(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_relay_host() -> String {
    DEFAULT_RELAY_HOST.to_string()
}
fn default_relay_port() -> u16 {
    DEFAULT_RELAY_PORT
}
fn default_sender() -> String {
    "meetman@localhost".to_string()
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.meetman/meetings.db", home)
}
fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.meetman/meetman.toml", home)
}

impl MeetmanConfig {
    /// Load config from a TOML file with MEETMAN_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.meetman/meetman.toml
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: MeetmanConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("MEETMAN_").split("_"))
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        config.tz()?;
        Ok(config)
    }

    /// Parse the configured timezone name.
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::Timezone(self.timezone.clone()))
    }
}
