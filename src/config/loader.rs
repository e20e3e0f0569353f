use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Why the menu configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read termfolio config {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in termfolio config {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid termfolio config: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/termfolio/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if there is no config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("termfolio").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file is not an error: built-in defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `bind_addr` parses as a socket address
    /// - the tick interval is non-zero
    /// - the menu has at least one item and no item has a blank label
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid bind address '{}'", self.server.bind_addr),
            });
        }

        if self.server.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "tick_interval_ms must be greater than zero".to_string(),
            });
        }

        if self.menu.items.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one menu item must be configured".to_string(),
            });
        }

        if let Some(position) = self
            .menu
            .items
            .iter()
            .position(|item| item.label.trim().is_empty())
        {
            return Err(ConfigError::ValidationError {
                message: format!("Menu item {} has an empty label", position + 1),
            });
        }

        Ok(())
    }
}
