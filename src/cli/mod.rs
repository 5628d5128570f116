//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands.

pub mod check;
pub mod servers;

use kvpn_core::config::toml_config::load_config;
use kvpn_core::config::AppConfig;
use kvpn_core::server::TomlStore;

/// Current time in epoch seconds
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Load the configuration and open the record store it points at
pub fn open_store() -> anyhow::Result<(AppConfig, TomlStore)> {
    let config = load_config()?;
    let store = TomlStore::new(config.store_path()?);
    tracing::debug!("Using record store {}", store.path().display());
    Ok((config, store))
}
