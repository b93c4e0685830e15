//! G-code line interpreter
//!
//! Turns one normalised line at a time into modal state changes and motion,
//! spindle and settings requests.
//!
//! ```text
//! tokenizer -> pass 1 (commands) -> pass 2 (parameters) -> arc solver -> dispatch
//! ```

pub mod arc;
pub mod commands;
pub mod dispatch;
pub mod interpreter;
pub mod machine;
pub mod modal;
pub mod parameters;
pub mod protocol;
pub mod settings_line;
pub mod tokenizer;
pub mod trace;

pub use arc::{solve_arc, theta, ArcDirection, ArcGeometry};
pub use commands::{resolve_commands, CommandResolution, NextAction};
pub use dispatch::{plan_motion, MotionPlan};
pub use interpreter::{execute_line, Interpreter};
pub use machine::{ArcMove, FeedRate, MotionControl, SpindleControl, MAX_ARC_SEGMENTS};
pub use modal::{InterpreterDefaults, ModalState, MotionMode, ProgramFlow, SpindleDirection};
pub use parameters::{resolve_parameters, LineParameters};
pub use protocol::normalize_line;
pub use trace::{MotionRequest, MotionTrace};

pub use motionkit_core::{GcodeError, Plane, StatusCode, Vector3};
pub use motionkit_settings::SettingsStore;
