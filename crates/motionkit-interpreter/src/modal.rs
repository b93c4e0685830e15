//! Modal state
//!
//! The single record of interpreter context that persists from one line to
//! the next.
//!
//! # Lifecycle
//!
//! A [`ModalState`] is created once with [`ModalState::new`] (the `init`
//! operation) before the first line is executed, is then mutated in place by
//! every line, and lives as long as the interpreter does. It is the only
//! channel through which line-to-line context flows.
//!
//! # Threading
//!
//! The state has exactly one writer: the thread running the line-dispatch
//! loop. There is no internal locking; callers must serialise
//! `execute_line` calls.
//!
//! # Partial updates on failure
//!
//! Pass 1 writes mode fields (motion mode, plane, units, distance mode, feed
//! mode, program flow, spindle direction, tool) as it reads them, and pass 2
//! writes the persistent feed rate and spindle speed. Neither is rolled back
//! when a later word or the arc solver fails. Only [`ModalState::position`]
//! is guarded: it is committed solely after a line fully resolves.

use motionkit_core::units::per_minute_to_per_second;
use motionkit_core::{Plane, StatusCode, Units, Vector3};
use motionkit_settings::{Config, MachineSettings};
use serde::{Deserialize, Serialize};

/// Motion mode (G0, G1, G2, G3, G80)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionMode {
    /// G0
    #[default]
    RapidLinear,
    /// G1
    Linear,
    /// G2
    ArcCw,
    /// G3
    ArcCcw,
    /// G80
    Cancel,
}

impl MotionMode {
    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            MotionMode::RapidLinear => "Rapid positioning (G0)",
            MotionMode::Linear => "Linear interpolation (G1)",
            MotionMode::ArcCw => "Clockwise arc (G2)",
            MotionMode::ArcCcw => "Counter-clockwise arc (G3)",
            MotionMode::Cancel => "Motion cancelled (G80)",
        }
    }
}

/// Program flow (M0/M1, M2/M30/M60)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProgramFlow {
    #[default]
    Running,
    Paused,
    Completed,
}

/// Spindle direction (M3, M4, M5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpindleDirection {
    #[default]
    Off,
    Cw,
    Ccw,
}

/// Values the interpreter is initialised from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpreterDefaults {
    /// Default feed rate in units/minute
    pub default_feed_rate: f64,
    /// Default seek rate in units/minute
    pub default_seek_rate: f64,
    /// Millimetres per inch
    pub mm_per_inch: f64,
}

impl Default for InterpreterDefaults {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl InterpreterDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self::from_settings(&config.machine, config.mm_per_inch)
    }

    /// Take the feed and seek rates from a live settings table (`$4`, `$5`)
    pub fn from_settings(settings: &MachineSettings, mm_per_inch: f64) -> Self {
        Self {
            default_feed_rate: settings.default_feed_rate,
            default_seek_rate: settings.default_seek_rate,
            mm_per_inch,
        }
    }
}

/// Persistent interpreter context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// Outcome of the most recent line
    pub status_code: StatusCode,
    pub motion_mode: MotionMode,
    /// G93: `F` is seconds per move rather than units per minute
    pub inverse_feed_rate_mode: bool,
    /// G20/G21
    pub units: Units,
    /// G90/G91
    pub absolute_mode: bool,
    pub program_flow: ProgramFlow,
    pub spindle_direction: SpindleDirection,
    /// mm/second
    pub feed_rate: f64,
    /// mm/second
    pub seek_rate: f64,
    /// Where the interpreter believes the tool is, in millimetres. Runs ahead
    /// of the physical tool while the motion pipeline drains.
    pub position: Vector3,
    pub tool: u32,
    pub spindle_speed: i32,
    /// G17/G18/G19
    pub plane: Plane,
    /// Conversion factor fixed at initialisation
    pub mm_per_inch: f64,
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new(&InterpreterDefaults::default())
    }
}

impl ModalState {
    /// Initialise the state: origin, G0, G17, G21, G90, G94, spindle off
    pub fn new(defaults: &InterpreterDefaults) -> Self {
        Self {
            status_code: StatusCode::Ok,
            motion_mode: MotionMode::RapidLinear,
            inverse_feed_rate_mode: false,
            units: Units::Millimeters,
            absolute_mode: true,
            program_flow: ProgramFlow::Running,
            spindle_direction: SpindleDirection::Off,
            feed_rate: per_minute_to_per_second(defaults.default_feed_rate),
            seek_rate: per_minute_to_per_second(defaults.default_seek_rate),
            position: Vector3::ZERO,
            tool: 0,
            spindle_speed: 0,
            plane: Plane::XY,
            mm_per_inch: defaults.mm_per_inch,
        }
    }

    /// Whether G20 is active
    pub fn inches_mode(&self) -> bool {
        self.units == Units::Inches
    }

    /// Convert a parsed linear value to millimetres under the active units
    pub fn to_millimeters(&self, value: f64) -> f64 {
        self.units.to_millimeters(value, self.mm_per_inch)
    }

    pub fn select_plane(&mut self, plane: Plane) {
        self.plane = plane;
    }
}
