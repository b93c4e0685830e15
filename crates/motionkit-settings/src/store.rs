//! Settings store
//!
//! [`SettingsStore`] is the boundary the interpreter calls for `$` lines.
//! [`SettingsManager`] is the standard implementation: it keeps the table in
//! memory, persists it after every change when a file is configured, and
//! writes the `$` listing to an output sink.

use crate::error::SettingsResult;
use crate::machine::MachineSettings;
use crate::persistence;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for the settings collaborator behind `$` lines
pub trait SettingsStore {
    /// Handle `$index=value`
    fn store_setting(&mut self, index: u32, value: f64) -> SettingsResult<()>;

    /// Handle a bare `$`
    fn dump_settings(&mut self);
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn store_setting(&mut self, index: u32, value: f64) -> SettingsResult<()> {
        (**self).store_setting(index, value)
    }

    fn dump_settings(&mut self) {
        (**self).dump_settings()
    }
}

/// In-memory settings table with optional file persistence
#[derive(Debug)]
pub struct SettingsManager<W: Write = io::Stdout> {
    settings: MachineSettings,
    path: Option<PathBuf>,
    out: W,
}

impl SettingsManager<io::Stdout> {
    /// Create a manager that lists settings on stdout
    pub fn new(settings: MachineSettings) -> Self {
        Self::with_writer(settings, io::stdout())
    }
}

impl<W: Write> SettingsManager<W> {
    /// Create a manager that lists settings on `out`
    pub fn with_writer(settings: MachineSettings, out: W) -> Self {
        Self {
            settings,
            path: None,
            out,
        }
    }

    /// Persist the table to `path` after every change
    pub fn with_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Load the table from `path` if it exists, otherwise start from `fallback`
    ///
    /// Either way the returned manager persists to `path`.
    pub fn open(path: &Path, fallback: MachineSettings, out: W) -> SettingsResult<Self> {
        let settings = if path.exists() {
            let loaded: MachineSettings = persistence::load_file(path)?;
            loaded.validate()?;
            tracing::info!("Loaded machine settings from {}", path.display());
            loaded
        } else {
            tracing::debug!(
                "No settings file at {}, using configured defaults",
                path.display()
            );
            fallback
        };
        Ok(Self::with_writer(settings, out).with_persistence(path))
    }

    /// Current settings table
    pub fn settings(&self) -> &MachineSettings {
        &self.settings
    }

    /// Persistence file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Output sink
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Write the table to the persistence file, if one is configured
    pub fn save(&self) -> SettingsResult<()> {
        match &self.path {
            Some(path) => persistence::save_file(path, &self.settings),
            None => Ok(()),
        }
    }
}

impl<W: Write> SettingsStore for SettingsManager<W> {
    fn store_setting(&mut self, index: u32, value: f64) -> SettingsResult<()> {
        self.settings.set(index, value)?;
        tracing::info!("Stored new setting ${} = {}", index, value);

        // The value is live either way; a failed write only loses it on restart.
        if let Err(e) = self.save() {
            tracing::error!("Failed to persist setting ${}: {}", index, e);
        }
        Ok(())
    }

    fn dump_settings(&mut self) {
        let report = self.settings.report();
        if let Err(e) = self.out.write_all(report.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::error!("Failed to write settings listing: {}", e);
        }
    }
}
