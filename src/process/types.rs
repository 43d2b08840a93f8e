/*!
 * Process Types
 * Simulated process record and lifecycle state
 */

use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Added to the simulation, arrival tick not reached yet
    New,
    /// Admitted into the scheduler's ready set
    Ready,
    /// Currently holding the CPU
    Running,
    /// All work done and reported
    Terminated,
}

impl ProcessState {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Terminated => "terminated",
        }
    }
}

/// A unit of simulated CPU work
///
/// Identity and inputs are fixed at construction. Only `state` and
/// `remaining_time` change afterwards, through the setters below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pid: Pid,
    arrival_time: Tick,
    burst_time: Tick,
    priority: Priority,
    remaining_time: Tick,
    state: ProcessState,
}

impl Process {
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, arrival_time: Tick, burst_time: Tick, priority: Priority) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            state: ProcessState::New,
        }
    }

    #[inline(always)]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    #[inline(always)]
    pub const fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    #[inline(always)]
    pub const fn burst_time(&self) -> Tick {
        self.burst_time
    }

    #[inline(always)]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[inline(always)]
    pub const fn remaining_time(&self) -> Tick {
        self.remaining_time
    }

    #[inline(always)]
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    /// Ticks of work already executed
    #[inline]
    pub const fn executed_time(&self) -> Tick {
        self.burst_time - self.remaining_time
    }

    #[inline]
    pub const fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    #[inline]
    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Set remaining work, clamped to the burst time
    #[inline]
    pub fn set_remaining_time(&mut self, remaining: Tick) {
        self.remaining_time = remaining.min(self.burst_time);
    }

    /// Execute one tick of work (floors at zero)
    #[inline]
    pub fn decrement_remaining_time(&mut self) {
        self.remaining_time = self.remaining_time.saturating_sub(1);
    }

    /// Restore the freshly-added state
    pub(crate) fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.state = ProcessState::New;
    }
}
