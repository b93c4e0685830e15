//! Motion and spindle collaborators
//!
//! The interpreter hands resolved moves to a [`MotionControl`] and spindle
//! changes to a [`SpindleControl`]. Both are fire-and-forget: calls enqueue
//! work for a downstream executor and return immediately.

use crate::modal::SpindleDirection;
use motionkit_core::{Plane, Vector3};
use serde::{Deserialize, Serialize};

/// Rate operand attached to a move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeedRate {
    /// Persistent feed rate, mm/second
    UnitsPerSecond(f64),
    /// G93: seconds for this move; `None` when the line carried no `F`
    InverseTime(Option<f64>),
}

impl FeedRate {
    /// Raw rate operand; `-1.0` marks an inverse-time move with no `F`
    pub fn rate(self) -> f64 {
        match self {
            FeedRate::UnitsPerSecond(rate) => rate,
            FeedRate::InverseTime(seconds) => seconds.unwrap_or(-1.0),
        }
    }

    pub fn is_inverse_time(self) -> bool {
        matches!(self, FeedRate::InverseTime(_))
    }
}

/// An arc request in the plane's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcMove {
    pub theta_start: f64,
    /// Signed; negative is counter-clockwise
    pub angular_travel: f64,
    pub radius: f64,
    /// Travel along the plane's depth axis
    pub depth: f64,
    pub plane: Plane,
    pub feed: FeedRate,
}

/// Upper bound on the segments one arc is split into
///
/// Arcs whose length would need more are traced with longer chords.
pub const MAX_ARC_SEGMENTS: usize = 1_000_000;

impl ArcMove {
    /// Number of straight segments used to approximate this arc, at most
    /// [`MAX_ARC_SEGMENTS`]
    pub fn segment_count(&self, mm_per_segment: f64) -> usize {
        let length = (self.angular_travel * self.radius).hypot(self.depth.abs());
        let segments = (length / mm_per_segment).ceil();
        if mm_per_segment > 0.0 && !segments.is_nan() {
            segments.clamp(1.0, MAX_ARC_SEGMENTS as f64) as usize
        } else {
            1
        }
    }

    /// Interpolate the arc from `start` into segment end points
    ///
    /// Points are produced lazily. The centre is recovered from `start` and
    /// `theta_start`. The last point lands on the arc's end up to rounding;
    /// the interpreter follows every arc with a line to the exact target.
    pub fn trace(&self, start: Vector3, mm_per_segment: f64) -> impl Iterator<Item = Vector3> {
        let (a0, a1, a2) = (self.plane.axis_0, self.plane.axis_1, self.plane.axis_2);
        let segments = self.segment_count(mm_per_segment);
        let theta_per_segment = self.angular_travel / segments as f64;
        let depth_per_segment = self.depth / segments as f64;
        let (theta_start, radius) = (self.theta_start, self.radius);

        let center_0 = start[a0] - theta_start.sin() * radius;
        let center_1 = start[a1] - theta_start.cos() * radius;

        (1..=segments).map(move |i| {
            let step = i as f64;
            let theta = theta_start + theta_per_segment * step;
            let mut point = start;
            point[a0] = center_0 + theta.sin() * radius;
            point[a1] = center_1 + theta.cos() * radius;
            point[a2] = start[a2] + depth_per_segment * step;
            point
        })
    }
}

/// Motion executor
pub trait MotionControl {
    /// Straight move to an absolute target
    fn line(&mut self, target: Vector3, feed: FeedRate);

    /// Arc (or helix) starting at the current position
    fn arc(&mut self, arc: &ArcMove);

    fn dwell(&mut self, milliseconds: u32);

    /// Return to the reference position
    fn go_home(&mut self);
}

/// Spindle driver
pub trait SpindleControl {
    fn run(&mut self, direction: SpindleDirection, speed: i32);

    fn stop(&mut self);
}

impl<T: MotionControl + ?Sized> MotionControl for &mut T {
    fn line(&mut self, target: Vector3, feed: FeedRate) {
        (**self).line(target, feed)
    }

    fn arc(&mut self, arc: &ArcMove) {
        (**self).arc(arc)
    }

    fn dwell(&mut self, milliseconds: u32) {
        (**self).dwell(milliseconds)
    }

    fn go_home(&mut self) {
        (**self).go_home()
    }
}

impl<T: SpindleControl + ?Sized> SpindleControl for &mut T {
    fn run(&mut self, direction: SpindleDirection, speed: i32) {
        (**self).run(direction, speed)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
