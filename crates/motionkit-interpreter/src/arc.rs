//! Arc geometry solver
//!
//! Derives start angle, signed angular travel, radius and helical depth for
//! a G2/G3 move. Angles are measured in radians of deviation from the
//! positive direction of the plane's second axis; positive angles rotate
//! toward the first axis, so increasing theta is clockwise travel.

use motionkit_core::{GcodeError, Plane, Result, Vector3};
use std::f64::consts::PI;

/// Direction of arc travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// G2
    Clockwise,
    /// G3
    CounterClockwise,
}

/// Resolved arc, before it is paired with a feed rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Centre relative to the start position
    pub offset: Vector3,
    pub theta_start: f64,
    /// Negative for counter-clockwise travel
    pub angular_travel: f64,
    pub radius: f64,
    /// Signed displacement along the plane's depth axis
    pub depth: f64,
}

/// Angle of `(x, y)` from the positive y direction
///
/// Covers `[-π, π]`. For `y <= 0` the angle is reflected around `±π`
/// according to the sign of `atan(x/|y|)`; the asymmetry at `y == 0` is
/// relied on by the centre and travel-direction computations.
pub fn theta(x: f64, y: f64) -> f64 {
    let theta = (x / y.abs()).atan();
    if y > 0.0 {
        theta
    } else if theta > 0.0 {
        PI - theta
    } else {
        -PI - theta
    }
}

/// Arc centre relative to `position` for a move given by radius (`R`)
///
/// Only the in-plane components of the returned offset are set. A negative
/// radius selects the centre on the far side of the chord, giving the
/// reflex arc.
pub fn center_from_radius(
    position: Vector3,
    target: Vector3,
    radius: f64,
    plane: Plane,
    direction: ArcDirection,
) -> Result<Vector3> {
    let x = target[plane.axis_0] - position[plane.axis_0];
    let y = target[plane.axis_1] - position[plane.axis_1];

    let mut h_x2_div_d = -(4.0 * radius * radius - x * x - y * y).sqrt() / x.hypot(y);
    if !h_x2_div_d.is_finite() {
        return Err(GcodeError::FloatingPointError {
            reason: format!(
                "no arc of radius {} joins points {:.4} apart",
                radius,
                x.hypot(y)
            ),
        });
    }
    if direction == ArcDirection::CounterClockwise {
        h_x2_div_d = -h_x2_div_d;
    }
    if radius < 0.0 {
        h_x2_div_d = -h_x2_div_d;
    }

    let mut offset = Vector3::ZERO;
    offset[plane.axis_0] = (x - y * h_x2_div_d) / 2.0;
    offset[plane.axis_1] = (y + x * h_x2_div_d) / 2.0;
    Ok(offset)
}

/// Solve an arc from `position` to `target`
///
/// With `radius` set the centre is derived from it, otherwise `offset`
/// (I/J/K) is taken as the centre relative to `position`.
pub fn solve_arc(
    position: Vector3,
    target: Vector3,
    offset: Vector3,
    radius: Option<f64>,
    plane: Plane,
    direction: ArcDirection,
) -> Result<ArcGeometry> {
    let offset = match radius {
        Some(r) => center_from_radius(position, target, r, plane, direction)?,
        None => offset,
    };
    let (a0, a1, a2) = (plane.axis_0, plane.axis_1, plane.axis_2);

    let theta_start = theta(-offset[a0], -offset[a1]);
    let mut theta_end = theta(
        target[a0] - offset[a0] - position[a0],
        target[a1] - offset[a1] - position[a1],
    );
    if theta_end < theta_start {
        theta_end += 2.0 * PI;
    }
    let mut angular_travel = theta_end - theta_start;
    if direction == ArcDirection::CounterClockwise {
        angular_travel -= 2.0 * PI;
    }

    Ok(ArcGeometry {
        offset,
        theta_start,
        angular_travel,
        radius: offset[a0].hypot(offset[a1]),
        depth: target[a2] - position[a2],
    })
}
