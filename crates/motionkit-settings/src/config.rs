//! Configuration for motionkit
//!
//! Provides the configuration source the interpreter is initialised from:
//! the inch/millimetre factor, the initial machine settings table (which
//! supplies the default feed and seek rates) and the optional file the
//! settings table is persisted to. Supports JSON and TOML.

use crate::error::{ConfigError, SettingsResult};
use crate::machine::MachineSettings;
use crate::persistence;
use motionkit_core::units::MM_PER_INCH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_mm_per_inch() -> f64 {
    MM_PER_INCH
}

/// Complete interpreter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Millimetres per inch applied to linear words in G20 mode
    #[serde(default = "default_mm_per_inch")]
    pub mm_per_inch: f64,
    /// File the `$` settings table is persisted to after every change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
    /// Initial settings table, used when no settings file exists yet
    #[serde(default)]
    pub machine: MachineSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mm_per_inch: MM_PER_INCH,
            settings_file: None,
            machine: MachineSettings::default(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location (`<config dir>/motionkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("motionkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config: Self = persistence::load_file(path)?;
        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        persistence::save_file(path, self)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.mm_per_inch.is_finite() && self.mm_per_inch > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "mm_per_inch".to_string(),
                value: self.mm_per_inch.to_string(),
            }
            .into());
        }
        self.machine.validate()
    }

    /// Default feed rate in mm/min
    pub fn default_feed_rate(&self) -> f64 {
        self.machine.default_feed_rate
    }

    /// Default seek rate in mm/min
    pub fn default_seek_rate(&self) -> f64 {
        self.machine.default_seek_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert_eq!(config.mm_per_inch, 25.4);
        assert_eq!(config.default_feed_rate(), 480.0);
        assert_eq!(config.default_seek_rate(), 480.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_factor() {
        let config = Config {
            mm_per_inch: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("mm_per_inch = 25.4\n").unwrap();
        assert_eq!(config.machine, MachineSettings::default());
        assert!(config.settings_file.is_none());
    }

    #[test]
    fn test_default_path_is_under_motionkit() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("motionkit/config.toml"));
        }
    }
}
