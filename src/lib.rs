//! # MotionKit
//!
//! A G-code interpreter for CNC motion controllers. Lines are read one at a
//! time, resolved against a persistent modal state and turned into motion,
//! spindle and settings requests.
//!
//! ## Architecture
//!
//! MotionKit is organized as a workspace with multiple crates:
//!
//! 1. **motionkit-core** - Status codes, errors, units, axis/plane types
//! 2. **motionkit-settings** - `$` settings table, persistence, configuration
//! 3. **motionkit-interpreter** - Tokenizer, two-pass resolution, arc solver, dispatch
//! 4. **motionkit** - Command line front end that speaks the serial line protocol

pub mod session;

pub use motionkit_core::{Axis, GcodeError, Plane, StatusCode, Units, Vector3};
pub use motionkit_interpreter::{
    normalize_line, ArcMove, FeedRate, Interpreter, InterpreterDefaults, ModalState,
    MotionControl, MotionRequest, MotionTrace, SpindleControl, MAX_ARC_SEGMENTS,
};
pub use motionkit_settings::{Config, MachineSettings, SettingsManager, SettingsStore};
pub use session::{RunSummary, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Greeting printed before the first line is read
pub fn banner() -> String {
    format!("motionkit {} ['$' for settings]", VERSION)
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (default level `info`)
/// - Output on stderr, leaving stdout to protocol responses
/// - JSON lines instead of human-readable output when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
