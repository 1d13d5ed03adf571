//! Host collaborators
//!
//! The monitor never owns a clock or a frame loop. Hosts hand it both, and
//! call [`FpsMonitor::tick`](crate::monitor::FpsMonitor::tick) once per
//! display refresh while a tick is scheduled.

use std::fmt::Debug;
use std::time::Instant;

/// Monotonic high-resolution time source, in milliseconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Per-refresh scheduling primitive
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + Debug;

    /// Request one tick on the next refresh
    fn schedule_next_tick(&mut self) -> Self::Handle;

    /// Withdraw a request made by `schedule_next_tick`
    fn cancel(&mut self, handle: Self::Handle);
}

/// Clock backed by [`Instant`], counting from construction
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Scheduler for hosts that run their own render loop
///
/// The loop samples only while [`LoopScheduler::pending`] holds a handle;
/// at most one tick is outstanding at a time.
#[derive(Debug, Default)]
pub struct LoopScheduler {
    next_id: u64,
    pending: Option<u64>,
}

impl LoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the tick due on the next iteration, if any
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }
}

impl FrameScheduler for LoopScheduler {
    type Handle = u64;

    fn schedule_next_tick(&mut self) -> u64 {
        self.next_id += 1;
        self.pending = Some(self.next_id);
        self.next_id
    }

    fn cancel(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
