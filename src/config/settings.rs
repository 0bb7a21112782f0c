//! Application settings loaded from `config.toml` and the environment.
//!
//! Every section is optional; missing values fall back to defaults. The
//! `DATABASE_URL` and `SERVER_PORT` environment variables override the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Whole `config.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub dashboard: DashboardConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 2022,
        }
    }
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/govtracker.sqlite?mode=rwc".to_string(),
        }
    }
}

/// `[dashboard]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    /// How far back an alert still counts as recent
    pub recent_alert_window_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_alert_window_days: crate::core::dashboard::DEFAULT_RECENT_ALERT_WINDOW_DAYS,
        }
    }
}

impl AppConfig {
    /// Address the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Applies `DATABASE_URL` / `SERVER_PORT` style overrides.
    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        server_port: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(port) = server_port {
            self.server.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("SERVER_PORT `{port}` is not a valid port: {e}"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let max = crate::core::dashboard::MAX_RECENT_ALERT_WINDOW_DAYS;
        if !(1..=max).contains(&self.dashboard.recent_alert_window_days) {
            return Err(Error::Config {
                message: format!("dashboard.recent_alert_window_days must be between 1 and {max}"),
            });
        }
        Ok(())
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads `./config.toml` when present, then applies environment overrides.
pub fn load_app_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    let config = if path.exists() {
        info!("Loading configuration from config.toml");
        load_config(path)?
    } else {
        debug!("No config.toml found, using defaults");
        AppConfig::default()
    };

    config.with_overrides(
        std::env::var("DATABASE_URL").ok(),
        std::env::var("SERVER_PORT").ok(),
    )
}
