//! TOML configuration file I/O
//!
//! Handles loading and saving client configuration to/from TOML files
//! in the user's configuration directory.

use crate::config::AppConfig;
use crate::error::{ConfigError, KvpnError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, KvpnError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KvpnError::Config(ConfigError::IoError {
                message: format!("Failed to read config file: {}", e),
            })
        })?;

        let config: AppConfig = toml::from_str(&contents).map_err(|e| {
            KvpnError::Config(ConfigError::ValidationError {
                message: format!("Failed to parse config file: {}", e),
            })
        })?;

        config.validate().map_err(|message| {
            warn!("Configuration validation failed: {}", message);
            KvpnError::Config(ConfigError::ValidationError { message })
        })?;

        info!(
            "Loaded configuration: hide_expired={}, include_premium={}",
            config.listing.hide_expired, config.listing.include_premium
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), KvpnError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KvpnError::Config(ConfigError::IoError {
                    message: format!("Failed to create config directory: {}", e),
                })
            })?;
        }

        std::fs::write(path, contents).map_err(|e| {
            KvpnError::Config(ConfigError::IoError {
                message: format!("Failed to write config file: {}", e),
            })
        })?;

        Ok(())
    }
}

/// Get the default configuration directory
///
/// Returns ~/.config/kvpn, or KVPN_CONFIG_DIR if set
pub fn get_config_dir() -> Result<PathBuf, KvpnError> {
    if let Ok(config_dir) = std::env::var("KVPN_CONFIG_DIR") {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME").map_err(|_| {
        KvpnError::Config(ConfigError::IoError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join("kvpn"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, KvpnError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from the default location
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<AppConfig, KvpnError> {
    let path = get_config_path()?;
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    AppConfig::from_file(&path)
}
