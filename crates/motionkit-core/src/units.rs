//! Unit conversion utilities
//!
//! The interpreter keeps every position in millimetres. Linear words parsed
//! while inch mode is active are scaled on the way in; feed rates are further
//! converted from per-minute to per-second.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres in one inch
pub const MM_PER_INCH: f64 = 25.4;

/// Seconds in one minute, for feed rate conversion
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Unit system for linear words (G20/G21)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimetres (G21)
    #[default]
    Millimeters,
    /// Inches (G20)
    Inches,
}

impl Units {
    /// Convert a parsed linear value into millimetres
    ///
    /// `mm_per_inch` is the configured conversion factor, normally [`MM_PER_INCH`].
    pub fn to_millimeters(self, value: f64, mm_per_inch: f64) -> f64 {
        match self {
            Units::Millimeters => value,
            Units::Inches => value * mm_per_inch,
        }
    }

    /// Short unit label ("mm" or "in")
    pub fn label(self) -> &'static str {
        match self {
            Units::Millimeters => "mm",
            Units::Inches => "in",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Millimeters => write!(f, "Millimeters"),
            Units::Inches => write!(f, "Inches"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "millimeters" | "mm" | "metric" => Ok(Units::Millimeters),
            "inches" | "inch" | "in" | "imperial" => Ok(Units::Inches),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

/// Convert a rate in units/minute to units/second
pub fn per_minute_to_per_second(rate: f64) -> f64 {
    rate / SECONDS_PER_MINUTE
}
