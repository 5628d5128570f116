//! Error types for the kvpn client
//!
//! Invalid selection attempts (connecting with an unusable record, changing
//! server while connected) are not errors; they surface as predicate failures
//! and [`crate::vpn::controller::Rejection`] values. Everything here comes
//! from a collaborator: the record store, the engine or the filesystem.

use thiserror::Error;

/// Main error type for the kvpn client
#[derive(Error, Debug)]
pub enum KvpnError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors reported by the record store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Errors reported by the VPN engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Configuration-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// Record store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to read record store {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to write record store {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("Record store {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Record store has no server ids left to assign")]
    IdsExhausted,
}

/// Errors returned by the external VPN engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Connect failed: {reason}")]
    ConnectFailed { reason: String },

    #[error("Disconnect failed: {reason}")]
    DisconnectFailed { reason: String },

    #[error("Stop failed: {reason}")]
    StopFailed { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KvpnError>;
