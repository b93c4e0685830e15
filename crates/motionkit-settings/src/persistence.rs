//! Settings Persistence
//!
//! Reads and writes serde documents as JSON or TOML, chosen by file extension.
//! Used for both the configuration file and the machine settings file.

use crate::error::{ConfigError, SettingsResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

/// Load a document from `path`
pub fn load_file<T: DeserializeOwned>(path: &Path) -> SettingsResult<T> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let value = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Toml => toml::from_str(&content)?,
    };
    Ok(value)
}

/// Save a document to `path`, creating parent directories as needed
pub fn save_file<T: Serialize>(path: &Path, value: &T) -> SettingsResult<()> {
    let format = FileFormat::from_path(path)?;
    let content = match format {
        FileFormat::Json => serde_json::to_string_pretty(value)?,
        FileFormat::Toml => toml::to_string_pretty(value)?,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}
