//! Motion dispatch
//!
//! A resolved line is first turned into a [`MotionPlan`]; arc geometry is
//! solved at that point so a geometry failure aborts the line before any
//! request leaves the interpreter. [`dispatch`] then re-asserts the spindle
//! and issues the planned requests.

use crate::arc::{solve_arc, ArcDirection};
use crate::commands::NextAction;
use crate::machine::{ArcMove, FeedRate, MotionControl, SpindleControl};
use crate::modal::{ModalState, MotionMode, SpindleDirection};
use crate::parameters::LineParameters;
use motionkit_core::{Result, Vector3};
use tracing::debug;

/// Physical action for one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionPlan {
    /// G80 active: no motion
    Idle,
    GoHome,
    Dwell { milliseconds: u32 },
    Line { target: Vector3, feed: FeedRate },
    /// Arc followed by a corrective line to `target`
    Arc { arc: ArcMove, target: Vector3 },
}

/// Dwell seconds to whole milliseconds, truncated and saturating
pub fn dwell_milliseconds(seconds: f64) -> u32 {
    (seconds * 1000.0).trunc() as u32
}

/// Rate operand for this line's moves
pub fn line_feed(state: &ModalState, params: &LineParameters) -> FeedRate {
    if state.inverse_feed_rate_mode {
        FeedRate::InverseTime(params.inverse_feed_rate)
    } else {
        FeedRate::UnitsPerSecond(state.feed_rate)
    }
}

/// Work out what a resolved line asks the machine to do
///
/// Dwell and go-home take precedence over the motion mode.
pub fn plan_motion(
    state: &ModalState,
    action: NextAction,
    params: &LineParameters,
) -> Result<MotionPlan> {
    let plan = match action {
        NextAction::GoHome => MotionPlan::GoHome,
        NextAction::Dwell => MotionPlan::Dwell {
            milliseconds: dwell_milliseconds(params.dwell),
        },
        NextAction::Default => {
            let feed = line_feed(state, params);
            match state.motion_mode {
                MotionMode::Cancel => MotionPlan::Idle,
                MotionMode::RapidLinear | MotionMode::Linear => MotionPlan::Line {
                    target: params.target,
                    feed,
                },
                MotionMode::ArcCw | MotionMode::ArcCcw => {
                    let direction = if state.motion_mode == MotionMode::ArcCw {
                        ArcDirection::Clockwise
                    } else {
                        ArcDirection::CounterClockwise
                    };
                    let geometry = solve_arc(
                        state.position,
                        params.target,
                        params.offset,
                        params.radius,
                        state.plane,
                        direction,
                    )?;
                    MotionPlan::Arc {
                        arc: ArcMove {
                            theta_start: geometry.theta_start,
                            angular_travel: geometry.angular_travel,
                            radius: geometry.radius,
                            depth: geometry.depth,
                            plane: state.plane,
                            feed,
                        },
                        target: params.target,
                    }
                }
            }
        }
    };
    Ok(plan)
}

/// Issue the spindle request and then the planned motion
pub fn dispatch<M, S>(state: &ModalState, plan: &MotionPlan, motion: &mut M, spindle: &mut S)
where
    M: MotionControl + ?Sized,
    S: SpindleControl + ?Sized,
{
    match state.spindle_direction {
        SpindleDirection::Off => spindle.stop(),
        direction => spindle.run(direction, state.spindle_speed),
    }

    debug!("Dispatching {:?}", plan);
    match *plan {
        MotionPlan::Idle => {}
        MotionPlan::GoHome => motion.go_home(),
        MotionPlan::Dwell { milliseconds } => motion.dwell(milliseconds),
        MotionPlan::Line { target, feed } => motion.line(target, feed),
        MotionPlan::Arc { arc, target } => {
            motion.arc(&arc);
            motion.line(target, arc.feed);
        }
    }
}
