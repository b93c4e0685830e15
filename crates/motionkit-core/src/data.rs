//! Axis, plane and vector types
//!
//! Positions are 3-vectors indexed by [`Axis`]. A [`Plane`] names the two
//! in-plane axes used for arc geometry plus the depth axis used for helices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Machine axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in a [`Vector3`]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis word letter
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A position or offset in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3(pub [f64; 3]);

impl Vector3 {
    /// The origin
    pub const ZERO: Vector3 = Vector3([0.0; 3]);

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }
}

impl Index<Axis> for Vector3 {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.index()]
    }
}

impl IndexMut<Axis> for Vector3 {
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        &mut self.0[axis.index()]
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.0[0], self.0[1], self.0[2])
    }
}

/// Active working plane (G17/G18/G19)
///
/// `axis_0` and `axis_1` span the plane; `axis_2` is the depth axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plane {
    pub axis_0: Axis,
    pub axis_1: Axis,
    pub axis_2: Axis,
}

impl Plane {
    /// G17
    pub const XY: Plane = Plane::new(Axis::X, Axis::Y, Axis::Z);
    /// G18
    pub const XZ: Plane = Plane::new(Axis::X, Axis::Z, Axis::Y);
    /// G19
    pub const YZ: Plane = Plane::new(Axis::Y, Axis::Z, Axis::X);

    pub const fn new(axis_0: Axis, axis_1: Axis, axis_2: Axis) -> Self {
        Self {
            axis_0,
            axis_1,
            axis_2,
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::XY
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis_0, self.axis_1)
    }
}
