//! Parameter resolution (pass 2)
//!
//! Re-reads the line from the start and resolves the positional and
//! parametric letters into a target position and per-line modifiers. Runs
//! only after pass 1 succeeded, so the modes it consults (units, distance
//! mode, feed mode) already reflect this line's G words.
//!
//! Linear words (`F I J K R X Y Z`) are converted to millimetres under the
//! active units; `P` and `S` are taken as written.

use crate::modal::ModalState;
use crate::tokenizer::{words, Word};
use motionkit_core::units::per_minute_to_per_second;
use motionkit_core::{Axis, Result, Vector3};

/// A word as seen by pass 2
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    Feed(f64),
    ArcOffset(Axis, f64),
    Dwell(f64),
    Radius(f64),
    SpindleSpeed(f64),
    Coordinate(Axis, f64),
}

impl Parameter {
    /// Classify a word; `None` for letters pass 2 does not use
    pub fn from_word(word: Word) -> Option<Self> {
        let value = word.value;
        let parameter = match word.letter {
            'F' => Parameter::Feed(value),
            'I' => Parameter::ArcOffset(Axis::X, value),
            'J' => Parameter::ArcOffset(Axis::Y, value),
            'K' => Parameter::ArcOffset(Axis::Z, value),
            'P' => Parameter::Dwell(value),
            'R' => Parameter::Radius(value),
            'S' => Parameter::SpindleSpeed(value),
            'X' => Parameter::Coordinate(Axis::X, value),
            'Y' => Parameter::Coordinate(Axis::Y, value),
            'Z' => Parameter::Coordinate(Axis::Z, value),
            _ => return None,
        };
        Some(parameter)
    }
}

/// Per-line results of pass 2, discarded after the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParameters {
    /// Absolute target in millimetres
    pub target: Vector3,
    /// Arc centre relative to the current position (I, J, K)
    pub offset: Vector3,
    /// `R`, when given; selects radius mode for arcs
    pub radius: Option<f64>,
    /// `P`, dwell seconds
    pub dwell: f64,
    /// `F` read while inverse-time mode is active, seconds for this move
    pub inverse_feed_rate: Option<f64>,
}

impl LineParameters {
    fn starting_at(position: Vector3) -> Self {
        Self {
            target: position,
            offset: Vector3::ZERO,
            radius: None,
            dwell: 0.0,
            inverse_feed_rate: None,
        }
    }
}

/// Spindle speed: the parsed value truncated toward zero
pub fn spindle_speed(value: f64) -> i32 {
    value.trunc() as i32
}

/// Run pass 2 over `line`
///
/// The target starts at the current position so axes without a word stay
/// put. Writes the persistent feed rate (outside inverse-time mode) and
/// spindle speed into `state`; never touches `state.position`.
pub fn resolve_parameters(
    line: &str,
    state: &mut ModalState,
    absolute_override: bool,
) -> Result<LineParameters> {
    let mut params = LineParameters::starting_at(state.position);
    let absolute = state.absolute_mode || absolute_override;

    for word in words(line) {
        let Some(parameter) = Parameter::from_word(word?) else {
            continue;
        };
        match parameter {
            Parameter::Feed(value) => {
                let rate = state.to_millimeters(value);
                if state.inverse_feed_rate_mode {
                    params.inverse_feed_rate = Some(rate);
                } else {
                    state.feed_rate = per_minute_to_per_second(rate);
                }
            }
            Parameter::ArcOffset(axis, value) => params.offset[axis] = state.to_millimeters(value),
            Parameter::Dwell(value) => params.dwell = value,
            Parameter::Radius(value) => params.radius = Some(state.to_millimeters(value)),
            Parameter::SpindleSpeed(value) => state.spindle_speed = spindle_speed(value),
            Parameter::Coordinate(axis, value) => {
                let value = state.to_millimeters(value);
                if absolute {
                    params.target[axis] = value;
                } else {
                    params.target[axis] = state.position[axis] + value;
                }
            }
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motionkit_core::Units;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {}, got {}", b, a);
    }

    #[test]
    fn test_unspecified_axes_stay_put() {
        let mut state = ModalState::default();
        state.position = Vector3::new(1.0, 2.0, 3.0);
        let params = resolve_parameters("X9", &mut state, false).unwrap();
        assert_eq!(params.target, Vector3::new(9.0, 2.0, 3.0));
        assert_eq!(params.offset, Vector3::ZERO);
        assert_eq!(state.position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_relative_words_add_to_position() {
        let mut state = ModalState::default();
        state.absolute_mode = false;
        state.position = Vector3::new(5.0, 0.0, 0.0);
        let params = resolve_parameters("X2Z-1", &mut state, false).unwrap();
        assert_eq!(params.target, Vector3::new(7.0, 0.0, -1.0));
    }

    #[test]
    fn test_absolute_override() {
        let mut state = ModalState::default();
        state.absolute_mode = false;
        state.position = Vector3::new(5.0, 5.0, 5.0);
        let params = resolve_parameters("X2", &mut state, true).unwrap();
        assert_eq!(params.target, Vector3::new(2.0, 5.0, 5.0));
    }

    #[test]
    fn test_inch_conversion() {
        let mut state = ModalState::default();
        state.units = Units::Inches;
        let params = resolve_parameters("X1I0.5R2S100P2F60", &mut state, false).unwrap();
        assert_close(params.target.x(), 25.4);
        assert_close(params.offset.x(), 12.7);
        assert_close(params.radius.unwrap(), 50.8);
        assert_eq!(state.spindle_speed, 100);
        assert_eq!(params.dwell, 2.0);
        assert_close(state.feed_rate, 25.4);
    }

    #[test]
    fn test_feed_rate_per_second() {
        let mut state = ModalState::default();
        let params = resolve_parameters("F600", &mut state, false).unwrap();
        assert_eq!(state.feed_rate, 10.0);
        assert_eq!(params.inverse_feed_rate, None);
    }

    #[test]
    fn test_inverse_feed_rate_is_per_line() {
        let mut state = ModalState::default();
        state.inverse_feed_rate_mode = true;
        let before = state.feed_rate;
        let params = resolve_parameters("F2", &mut state, false).unwrap();
        assert_eq!(params.inverse_feed_rate, Some(2.0));
        assert_eq!(state.feed_rate, before);
    }

    #[test]
    fn test_offsets_and_radius() {
        let mut state = ModalState::default();
        let params = resolve_parameters("I1J-2K3", &mut state, false).unwrap();
        assert_eq!(params.offset, Vector3::new(1.0, -2.0, 3.0));
        assert_eq!(params.radius, None);

        let params = resolve_parameters("R-5", &mut state, false).unwrap();
        assert_eq!(params.radius, Some(-5.0));
    }

    #[test]
    fn test_modal_letters_ignored() {
        let mut state = ModalState::default();
        let params = resolve_parameters("G1M3T4N10X1", &mut state, false).unwrap();
        assert_eq!(params.target.x(), 1.0);
    }

    #[test]
    fn test_spindle_speed_truncates() {
        assert_eq!(spindle_speed(1200.9), 1200);
        assert_eq!(spindle_speed(-3.5), -3);
    }
}
