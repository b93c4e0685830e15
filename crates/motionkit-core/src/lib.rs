//! # motionkit Core
//!
//! Core types shared by the interpreter, settings and front-end crates:
//! - Per-line status codes and the error taxonomy behind them
//! - Unit systems and inch/millimetre conversion
//! - Axis, plane and vector types used for targets and arc geometry

pub mod data;
pub mod error;
pub mod units;

pub use data::{Axis, Plane, Vector3};
pub use error::{GcodeError, Result, StatusCode};
pub use units::{Units, MM_PER_INCH};
