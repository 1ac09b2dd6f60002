//! Application configuration
//!
//! Loaded from a TOML file (`GAMECLUB_CONFIG` env var or the platform
//! config dir). Every section has defaults so a missing file still yields
//! a runnable development setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub discord: DiscordConfig,
    pub tasks: TasksConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./gameclub.db?mode=rwc".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-before-production".to_string()),
            jwt_expiration_hours: 24,
        }
    }
}

/// Bootstrap admin account, created when the users table is empty
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@gameclub.local".to_string(),
            password: "admin-change-me".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DiscordConfig {
    /// Webhook URL for state notifications; empty disables delivery
    pub webhook_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl DiscordConfig {
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(10)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// How often overdue reservation items are expired, in seconds
    pub item_expiry_interval_secs: u64,
    /// How often due state transitions are fired, in seconds
    pub state_transition_interval_secs: u64,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            item_expiry_interval_secs: 60,
            state_transition_interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&raw).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default config file location (e.g. `~/.config/gameclub/config.toml`)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gameclub")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.database.url.starts_with("sqlite://"));
        assert_eq!(cfg.tasks.item_expiry_interval_secs, 60);
        assert!(cfg.discord.webhook_url.is_none());
        assert_eq!(cfg.discord.timeout_secs(), 10);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [discord]
            webhook_url = "https://discord.com/api/webhooks/1/abc"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(
            cfg.discord.webhook_url.as_deref(),
            Some("https://discord.com/api/webhooks/1/abc")
        );
        assert_eq!(cfg.logging.level, "info");
    }
}
