//! Recording collaborator
//!
//! [`MotionTrace`] stands in for the motion executor and spindle driver and
//! keeps every request in order. Clones share one log, so a single trace can
//! be handed to the interpreter as both collaborators.

use crate::machine::{ArcMove, FeedRate, MotionControl, SpindleControl};
use crate::modal::SpindleDirection;
use motionkit_core::Vector3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// One request issued by the interpreter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum MotionRequest {
    Line { target: Vector3, feed: FeedRate },
    Arc { arc: ArcMove },
    Dwell { milliseconds: u32 },
    GoHome,
    SpindleRun { direction: SpindleDirection, speed: i32 },
    SpindleStop,
}

/// Shared, ordered log of requests
#[derive(Debug, Clone, Default)]
pub struct MotionTrace {
    requests: Rc<RefCell<Vec<MotionRequest>>>,
}

impl MotionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn requests(&self) -> Vec<MotionRequest> {
        self.requests.borrow().clone()
    }

    /// Remove and return the recorded requests
    pub fn take_requests(&self) -> Vec<MotionRequest> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.borrow().is_empty()
    }

    fn record(&self, request: MotionRequest) {
        trace!("Recorded {:?}", request);
        self.requests.borrow_mut().push(request);
    }
}

impl MotionControl for MotionTrace {
    fn line(&mut self, target: Vector3, feed: FeedRate) {
        self.record(MotionRequest::Line { target, feed });
    }

    fn arc(&mut self, arc: &ArcMove) {
        self.record(MotionRequest::Arc { arc: *arc });
    }

    fn dwell(&mut self, milliseconds: u32) {
        self.record(MotionRequest::Dwell { milliseconds });
    }

    fn go_home(&mut self) {
        self.record(MotionRequest::GoHome);
    }
}

impl SpindleControl for MotionTrace {
    fn run(&mut self, direction: SpindleDirection, speed: i32) {
        self.record(MotionRequest::SpindleRun { direction, speed });
    }

    fn stop(&mut self) {
        self.record(MotionRequest::SpindleStop);
    }
}
