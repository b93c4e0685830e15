//! Command resolution (pass 1)
//!
//! Reads every word of a line once and applies the modal letters (`G`, `M`,
//! `T`) to the [`ModalState`], returning the per-line action they select.
//! Parameter letters are skipped here; pass 2 reads them.
//!
//! Mode fields are written as each word is read. When a word fails, the
//! scan stops and the writes already made stay in place.

use crate::modal::{ModalState, MotionMode, ProgramFlow, SpindleDirection};
use crate::tokenizer::{words, Word};
use motionkit_core::{GcodeError, Plane, Result, Units};

/// Non-positional action selected for this line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NextAction {
    /// Perform the active motion mode
    #[default]
    Default,
    /// G4
    Dwell,
    /// G28, G30
    GoHome,
}

/// Supported G codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GCode {
    Motion(MotionMode),
    Dwell,
    SelectPlane(Plane),
    Units(Units),
    GoHome,
    AbsoluteOverride,
    AbsoluteMode,
    RelativeMode,
    InverseFeedRateMode,
    UnitsPerMinuteMode,
}

impl GCode {
    pub fn from_number(number: i64) -> Option<Self> {
        let code = match number {
            0 => GCode::Motion(MotionMode::RapidLinear),
            1 => GCode::Motion(MotionMode::Linear),
            2 => GCode::Motion(MotionMode::ArcCw),
            3 => GCode::Motion(MotionMode::ArcCcw),
            4 => GCode::Dwell,
            17 => GCode::SelectPlane(Plane::XY),
            18 => GCode::SelectPlane(Plane::XZ),
            19 => GCode::SelectPlane(Plane::YZ),
            20 => GCode::Units(Units::Inches),
            21 => GCode::Units(Units::Millimeters),
            28 | 30 => GCode::GoHome,
            53 => GCode::AbsoluteOverride,
            80 => GCode::Motion(MotionMode::Cancel),
            90 => GCode::AbsoluteMode,
            91 => GCode::RelativeMode,
            93 => GCode::InverseFeedRateMode,
            94 => GCode::UnitsPerMinuteMode,
            _ => return None,
        };
        Some(code)
    }
}

/// Supported M codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MCode {
    ProgramFlow(ProgramFlow),
    Spindle(SpindleDirection),
}

impl MCode {
    pub fn from_number(number: i64) -> Option<Self> {
        let code = match number {
            0 | 1 => MCode::ProgramFlow(ProgramFlow::Paused),
            2 | 30 | 60 => MCode::ProgramFlow(ProgramFlow::Completed),
            3 => MCode::Spindle(SpindleDirection::Cw),
            4 => MCode::Spindle(SpindleDirection::Ccw),
            5 => MCode::Spindle(SpindleDirection::Off),
            _ => return None,
        };
        Some(code)
    }
}

/// A word as seen by pass 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    G(GCode),
    M(MCode),
    Tool(u32),
    /// Any other letter; handled by pass 2
    Parameter,
}

impl Command {
    /// Classify a word, rejecting unknown G and M numbers
    pub fn from_word(word: Word) -> Result<Self> {
        let unsupported = || GcodeError::unsupported(word.letter, word.value);
        match word.letter {
            'G' => GCode::from_number(code_number(word.value))
                .map(Command::G)
                .ok_or_else(unsupported),
            'M' => MCode::from_number(code_number(word.value))
                .map(Command::M)
                .ok_or_else(unsupported),
            'T' => Ok(Command::Tool(tool_number(word.value))),
            _ => Ok(Command::Parameter),
        }
    }
}

/// Per-line results of pass 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandResolution {
    pub next_action: NextAction,
    /// G53: X/Y/Z are absolute on this line regardless of G91
    pub absolute_override: bool,
}

/// G/M code selector: the parsed value truncated toward zero (`G1.5` is `G1`)
pub fn code_number(value: f64) -> i64 {
    value.trunc() as i64
}

/// Tool id: the parsed value truncated toward zero, saturating at the `u32` bounds
pub fn tool_number(value: f64) -> u32 {
    value.trunc() as u32
}

/// Run pass 1 over `line`
pub fn resolve_commands(line: &str, state: &mut ModalState) -> Result<CommandResolution> {
    let mut resolution = CommandResolution::default();

    for word in words(line) {
        match Command::from_word(word?)? {
            Command::G(code) => apply_gcode(code, state, &mut resolution),
            Command::M(code) => apply_mcode(code, state),
            Command::Tool(tool) => state.tool = tool,
            Command::Parameter => {}
        }
    }

    Ok(resolution)
}

fn apply_gcode(code: GCode, state: &mut ModalState, resolution: &mut CommandResolution) {
    match code {
        GCode::Motion(mode) => state.motion_mode = mode,
        GCode::Dwell => resolution.next_action = NextAction::Dwell,
        GCode::SelectPlane(plane) => state.select_plane(plane),
        GCode::Units(units) => state.units = units,
        GCode::GoHome => resolution.next_action = NextAction::GoHome,
        GCode::AbsoluteOverride => resolution.absolute_override = true,
        GCode::AbsoluteMode => state.absolute_mode = true,
        GCode::RelativeMode => state.absolute_mode = false,
        GCode::InverseFeedRateMode => state.inverse_feed_rate_mode = true,
        GCode::UnitsPerMinuteMode => state.inverse_feed_rate_mode = false,
    }
}

fn apply_mcode(code: MCode, state: &mut ModalState) {
    match code {
        MCode::ProgramFlow(flow) => state.program_flow = flow,
        MCode::Spindle(direction) => state.spindle_direction = direction,
    }
}
