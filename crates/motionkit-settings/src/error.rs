//! Settings and configuration errors
//!
//! [`SettingsError`] covers the `$` table and the files it is read from and
//! written to. [`ConfigError`] covers values in the configuration file.

use std::io;
use thiserror::Error;

/// Failure to change, load or persist settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// `$index` is outside the table
    #[error("Unknown setting ${0}")]
    UnknownSetting(u32),

    /// The value breaks the rule for its setting
    #[error("Invalid value {value} for setting ${index}: {reason}")]
    InvalidValue {
        index: u32,
        value: f64,
        reason: String,
    },

    #[error("Settings file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML document: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("Could not encode TOML document: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems with the configuration file itself
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Extension other than `.json` or `.toml`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// No per-user config directory on this platform
    #[error("No configuration directory on platform {0}")]
    UnsupportedPlatform(String),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
