//! motionkit Settings Crate
//!
//! Handles the machine settings table edited through `$` lines, its
//! persistence, and the interpreter configuration file.

pub mod config;
pub mod error;
pub mod machine;
pub mod persistence;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use machine::{MachineSettings, SETTING_COUNT};
pub use store::{SettingsManager, SettingsStore};
