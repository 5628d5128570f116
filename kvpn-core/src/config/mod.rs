//! Configuration module
//!
//! Handles loading and saving client configuration from TOML files.

use crate::server::listing::ListingPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod toml_config;

/// File name of the record store inside the config directory
pub const STORE_FILE_NAME: &str = "servers.toml";

/// Record store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Record store file; defaults to `servers.toml` in the config directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Client configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    /// Server list filtering and ordering
    #[serde(default)]
    pub listing: ListingPolicy,
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                return Err("Store path cannot be empty".to_string());
            }
        }

        Ok(())
    }

    /// Resolve the record store file, relative to `config_dir` when unset
    pub fn store_path_in(&self, config_dir: &std::path::Path) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| config_dir.join(STORE_FILE_NAME))
    }

    /// Resolve the record store file against the default config directory
    pub fn store_path(&self) -> Result<PathBuf, crate::error::KvpnError> {
        Ok(self.store_path_in(&toml_config::get_config_dir()?))
    }
}
