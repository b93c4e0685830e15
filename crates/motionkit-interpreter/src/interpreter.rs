//! Line execution
//!
//! [`execute_line`] runs one normalised line end to end: comment and block
//! delete handling, `$` lines, pass 1, pass 2, motion planning, dispatch and
//! the position commit. [`Interpreter`] bundles the modal state with its
//! collaborators.

use crate::commands::resolve_commands;
use crate::dispatch::{dispatch, plan_motion};
use crate::machine::{MotionControl, SpindleControl};
use crate::modal::{InterpreterDefaults, ModalState};
use crate::parameters::resolve_parameters;
use crate::settings_line::execute_settings_line;
use motionkit_core::{Result, StatusCode};
use motionkit_settings::SettingsStore;
use tracing::{debug, warn};

/// Execute one normalised line against `state`
///
/// Returns the line's status, which is also left in `state.status_code`.
/// `state.position` only moves when the whole line succeeds.
pub fn execute_line<M, S, C>(
    state: &mut ModalState,
    line: &str,
    motion: &mut M,
    spindle: &mut S,
    settings: &mut C,
) -> StatusCode
where
    M: MotionControl + ?Sized,
    S: SpindleControl + ?Sized,
    C: SettingsStore + ?Sized,
{
    state.status_code = StatusCode::Ok;
    let result = run_line(state, line, motion, spindle, settings);
    state.status_code = StatusCode::from(&result);

    match result {
        Ok(()) => debug!("'{}' -> {}", line, state.status_code),
        Err(e) => warn!("'{}' failed: {}", line, e),
    }
    state.status_code
}

fn run_line<M, S, C>(
    state: &mut ModalState,
    line: &str,
    motion: &mut M,
    spindle: &mut S,
    settings: &mut C,
) -> Result<()>
where
    M: MotionControl + ?Sized,
    S: SpindleControl + ?Sized,
    C: SettingsStore + ?Sized,
{
    if line.starts_with('(') {
        return Ok(());
    }
    if line.starts_with('$') {
        return execute_settings_line(line, settings);
    }
    let block = line.strip_prefix('/').unwrap_or(line);

    let commands = resolve_commands(block, state)?;
    let params = resolve_parameters(block, state, commands.absolute_override)?;
    let plan = plan_motion(state, commands.next_action, &params)?;

    dispatch(state, &plan, motion, spindle);
    state.position = params.target;
    Ok(())
}

/// Modal state plus the collaborators it dispatches to
#[derive(Debug)]
pub struct Interpreter<M, S, C> {
    state: ModalState,
    motion: M,
    spindle: S,
    settings: C,
}

impl<M, S, C> Interpreter<M, S, C>
where
    M: MotionControl,
    S: SpindleControl,
    C: SettingsStore,
{
    /// Initialise the modal state and take ownership of the collaborators
    pub fn new(defaults: &InterpreterDefaults, motion: M, spindle: S, settings: C) -> Self {
        Self {
            state: ModalState::new(defaults),
            motion,
            spindle,
            settings,
        }
    }

    /// Execute one normalised line
    pub fn execute_line(&mut self, line: &str) -> StatusCode {
        execute_line(
            &mut self.state,
            line,
            &mut self.motion,
            &mut self.spindle,
            &mut self.settings,
        )
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn spindle(&self) -> &S {
        &self.spindle
    }

    pub fn settings(&self) -> &C {
        &self.settings
    }

    pub fn into_parts(self) -> (ModalState, M, S, C) {
        (self.state, self.motion, self.spindle, self.settings)
    }
}
