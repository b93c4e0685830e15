//! Line protocol session
//!
//! Feeds raw input lines through normalisation and the interpreter and
//! answers each with `ok` or `error: <message>`, the way the firmware answers
//! on its serial port. With tracing enabled every request issued for a line
//! is also printed as one JSON object.

use crate::{normalize_line, Config, Interpreter, InterpreterDefaults, MotionRequest, MotionTrace};
use motionkit_core::StatusCode;
use motionkit_settings::SettingsManager;
use serde_json::Value;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Totals for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Non-empty lines executed
    pub lines: usize,
    /// Lines that returned an error status
    pub errors: usize,
}

/// Interpreter wired to a recording collaborator
#[derive(Debug)]
pub struct Session<S: Write> {
    interpreter: Interpreter<MotionTrace, MotionTrace, SettingsManager<S>>,
    trace: MotionTrace,
    show_trace: bool,
}

impl<S: Write> Session<S> {
    /// Start a session; feed and seek defaults come from the settings table
    pub fn new(config: &Config, settings: SettingsManager<S>, show_trace: bool) -> Self {
        let defaults = InterpreterDefaults::from_settings(settings.settings(), config.mm_per_inch);
        let trace = MotionTrace::new();
        Self {
            interpreter: Interpreter::new(&defaults, trace.clone(), trace.clone(), settings),
            trace,
            show_trace,
        }
    }

    pub fn interpreter(&self) -> &Interpreter<MotionTrace, MotionTrace, SettingsManager<S>> {
        &self.interpreter
    }

    /// Execute one raw line and write its response
    ///
    /// Returns `None` for lines that are empty after normalisation; nothing
    /// is written for them.
    pub fn execute<W: Write>(&mut self, raw: &str, out: &mut W) -> io::Result<Option<StatusCode>> {
        let line = normalize_line(raw);
        if line.is_empty() {
            return Ok(None);
        }

        let status = self.interpreter.execute_line(&line);
        let requests = self.trace.take_requests();

        if self.show_trace {
            let mm_per_segment = self.interpreter.settings().settings().mm_per_arc_segment;
            for request in &requests {
                writeln!(out, "{}", request_json(request, mm_per_segment))?;
            }
        }
        writeln!(out, "{}", status)?;
        Ok(Some(status))
    }

    /// Execute every line of `input`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();
        for line in input.lines() {
            let line = line?;
            if let Some(status) = self.execute(&line, out)? {
                summary.lines += 1;
                if !status.is_ok() {
                    summary.errors += 1;
                }
            }
        }
        out.flush()?;

        info!(
            "Executed {} lines, {} errors",
            summary.lines, summary.errors
        );
        debug!("Final position {}", self.interpreter.state().position);
        Ok(summary)
    }
}

/// JSON form of a request; arcs also carry their interpolation segment count
fn request_json(request: &MotionRequest, mm_per_segment: f64) -> Value {
    let mut value = serde_json::to_value(request).unwrap_or(Value::Null);
    if let (MotionRequest::Arc { arc }, Value::Object(map)) = (request, &mut value) {
        map.insert(
            "segments".to_string(),
            Value::from(arc.segment_count(mm_per_segment)),
        );
    }
    value
}
