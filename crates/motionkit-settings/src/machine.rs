//! Machine settings table
//!
//! The numbered settings edited with `$N=value` lines and listed by a bare `$`.
//!
//! | Index | Setting                         | Default |
//! |-------|---------------------------------|---------|
//! | `$0`  | steps/mm X                      | 400     |
//! | `$1`  | steps/mm Y                      | 400     |
//! | `$2`  | steps/mm Z                      | 400     |
//! | `$3`  | step pulse length, microseconds | 30      |
//! | `$4`  | default feed rate, mm/min       | 480     |
//! | `$5`  | default seek rate, mm/min       | 480     |
//! | `$6`  | mm per arc segment              | 0.1     |
//! | `$7`  | step port invert mask           | 0       |

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Number of addressable settings
pub const SETTING_COUNT: u32 = 8;

const DESCRIPTIONS: [&str; SETTING_COUNT as usize] = [
    "steps/mm x",
    "steps/mm y",
    "steps/mm z",
    "microseconds step pulse",
    "mm/min default feed rate",
    "mm/min default seek rate",
    "mm/arc segment",
    "step port invert mask",
];

/// Persistent machine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Steps per millimetre for X, Y, Z
    pub steps_per_mm: [f64; 3],
    /// Step pulse length in microseconds
    pub pulse_microseconds: u8,
    /// Default feed rate in mm/min
    pub default_feed_rate: f64,
    /// Default seek (rapid) rate in mm/min
    pub default_seek_rate: f64,
    /// Chord length used when tracing arcs
    pub mm_per_arc_segment: f64,
    /// Step port invert mask
    pub invert_mask: u8,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            steps_per_mm: [400.0, 400.0, 400.0],
            pulse_microseconds: 30,
            default_feed_rate: 480.0,
            default_seek_rate: 480.0,
            mm_per_arc_segment: 0.1,
            invert_mask: 0,
        }
    }
}

impl MachineSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read setting `$index`
    pub fn get(&self, index: u32) -> Option<f64> {
        let value = match index {
            0..=2 => self.steps_per_mm[index as usize],
            3 => f64::from(self.pulse_microseconds),
            4 => self.default_feed_rate,
            5 => self.default_seek_rate,
            6 => self.mm_per_arc_segment,
            7 => f64::from(self.invert_mask),
            _ => return None,
        };
        Some(value)
    }

    /// Human-readable description of setting `$index`
    pub fn describe(index: u32) -> Option<&'static str> {
        DESCRIPTIONS.get(index as usize).copied()
    }

    /// Assign setting `$index`, validating the value first
    ///
    /// Byte-sized settings (`$3`, `$7`) are truncated to an integer.
    pub fn set(&mut self, index: u32, value: f64) -> SettingsResult<()> {
        let invalid = |reason: &str| SettingsError::InvalidValue {
            index,
            value,
            reason: reason.to_string(),
        };

        if !value.is_finite() {
            return Err(invalid("must be a finite number"));
        }
        let positive = || {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(invalid("must be greater than zero"))
            }
        };
        let non_negative = || {
            if value >= 0.0 {
                Ok(value)
            } else {
                Err(invalid("must not be negative"))
            }
        };
        let byte = || {
            if (0.0..256.0).contains(&value) {
                Ok(value.trunc() as u8)
            } else {
                Err(invalid("must be between 0 and 255"))
            }
        };

        match index {
            0..=2 => self.steps_per_mm[index as usize] = positive()?,
            3 => self.pulse_microseconds = byte()?,
            4 => self.default_feed_rate = non_negative()?,
            5 => self.default_seek_rate = non_negative()?,
            6 => self.mm_per_arc_segment = positive()?,
            7 => self.invert_mask = byte()?,
            _ => return Err(SettingsError::UnknownSetting(index)),
        }
        Ok(())
    }

    /// Check every setting against the same rules [`set`](Self::set) applies
    pub fn validate(&self) -> SettingsResult<()> {
        let mut scratch = self.clone();
        for index in 0..SETTING_COUNT {
            if let Some(value) = self.get(index) {
                scratch.set(index, value)?;
            }
        }
        Ok(())
    }

    /// Render the settings listing printed for a bare `$`
    pub fn report(&self) -> String {
        let mut out = String::new();
        for index in 0..SETTING_COUNT {
            let value = self.get(index).unwrap_or_default();
            let description = DESCRIPTIONS[index as usize];
            if index == 7 {
                let _ = writeln!(
                    out,
                    "${} = {} ({}, binary = {:08b})",
                    index, self.invert_mask, description, self.invert_mask
                );
            } else {
                let _ = writeln!(out, "${} = {:.3} ({})", index, value, description);
            }
        }
        out.push_str("'$x=value' to set parameter or just '$' to dump current settings\n");
        out
    }
}
