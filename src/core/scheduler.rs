//! Explicit tick scheduler for the real-time games.
//!
//! Replaces ad-hoc interval timers with an owned object whose lifecycle is
//! visible to the caller: it starts `Idle`, is `start`ed when a game begins
//! and `cancel`led when the game ends. The host loop feeds wall-clock deltas
//! into [`TickScheduler::advance`], which returns how many fixed-interval
//! ticks are due. Tests drive it with synthetic deltas, one tick at a time.

use tracing::{debug, trace};

/// Upper bound on a single `advance` delta, so a long pause does not
/// unleash a burst of catch-up ticks.
pub const MAX_FRAME_DT_MS: u64 = 500;

/// Lifecycle of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Cancelled,
}

/// Fixed-interval accumulator.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    state: SchedulerState,
    interval_ms: u64,
    accumulated_ms: u64,
    ticks_fired: u64,
}

impl TickScheduler {
    /// Create an idle scheduler. `interval_ms` is clamped to at least 1.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            state: SchedulerState::Idle,
            interval_ms: interval_ms.max(1),
            accumulated_ms: 0,
            ticks_fired: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    /// Begin producing ticks. A cancelled scheduler cannot be restarted;
    /// a new game builds a new scheduler.
    pub fn start(&mut self) {
        if self.state == SchedulerState::Idle {
            debug!(interval_ms = self.interval_ms, "tick scheduler started");
            self.state = SchedulerState::Running;
        }
    }

    /// Stop permanently. After this, `advance` always returns 0.
    pub fn cancel(&mut self) {
        if self.state != SchedulerState::Cancelled {
            debug!(ticks = self.ticks_fired, "tick scheduler cancelled");
            self.state = SchedulerState::Cancelled;
            self.accumulated_ms = 0;
        }
    }

    /// Change the cadence (e.g. Tetris level-up). Leftover time is kept.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Feed elapsed time; returns the number of ticks now due.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        if self.state != SchedulerState::Running {
            return 0;
        }
        self.accumulated_ms += dt_ms.min(MAX_FRAME_DT_MS);
        let due = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        self.ticks_fired += due;
        if due > 0 {
            trace!(due, total = self.ticks_fired, "ticks due");
        }
        due as u32
    }

    /// Take exactly one tick immediately, ignoring accumulated time.
    /// Returns false when the scheduler is not running.
    pub fn step(&mut self) -> bool {
        if self.state != SchedulerState::Running {
            return false;
        }
        self.ticks_fired += 1;
        true
    }
}
