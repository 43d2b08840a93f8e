/*!
 * First-Come-First-Served
 * Non-preemptive FIFO dispatch
 */

use super::traits::{dispatch, must_yield, Scheduler};
use crate::core::types::{Pid, Tick};
use crate::process::{Process, ProcessState, ProcessTable};
use std::collections::VecDeque;
use tracing::trace;

#[derive(Debug, Default)]
pub struct FcfsScheduler {
    ready: VecDeque<Pid>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn admit(&mut self, process: &mut Process) {
        process.set_state(ProcessState::Ready);
        self.ready.push_back(process.pid());
        trace!(pid = process.pid(), queued = self.ready.len(), "fcfs admit");
    }

    fn next(&mut self, table: &mut ProcessTable) -> Option<Pid> {
        self.ready.pop_front().map(|pid| dispatch(table, pid))
    }

    fn preempt(&mut self, process: &mut Process) {
        // Only ever asked to yield finished processes, which are dropped
        if !process.is_finished() {
            self.admit(process);
        }
    }

    fn needs_preemption(&self, process: Option<&Process>, _current_tick: Tick) -> bool {
        must_yield(process)
    }

    fn name(&self) -> &str {
        "First Come First Serve"
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }
}
