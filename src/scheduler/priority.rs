/*!
 * Priority Scheduling
 * Lowest priority value runs first, with optional preemption
 */

use super::entry::KeyedQueue;
use super::traits::{dispatch, must_yield, Scheduler};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::{Process, ProcessState, ProcessTable};
use tracing::trace;

/// Priority dispatch
///
/// In preemptive mode the running process yields as soon as a strictly
/// more urgent process is ready. Equal priorities never preempt.
#[derive(Debug)]
pub struct PriorityScheduler {
    ready: KeyedQueue<Priority>,
    preemptive: bool,
}

impl PriorityScheduler {
    pub fn new(preemptive: bool) -> Self {
        Self {
            ready: KeyedQueue::new(),
            preemptive,
        }
    }

    #[inline]
    pub fn is_preemptive(&self) -> bool {
        self.preemptive
    }
}

impl Scheduler for PriorityScheduler {
    fn admit(&mut self, process: &mut Process) {
        process.set_state(ProcessState::Ready);
        self.ready.push(process.pid(), process.priority());
        trace!(
            pid = process.pid(),
            priority = process.priority(),
            "priority admit"
        );
    }

    fn next(&mut self, table: &mut ProcessTable) -> Option<Pid> {
        self.ready.pop().map(|entry| dispatch(table, entry.pid))
    }

    fn preempt(&mut self, process: &mut Process) {
        if !process.is_finished() {
            self.admit(process);
        }
    }

    fn needs_preemption(&self, process: Option<&Process>, _current_tick: Tick) -> bool {
        let process = match process {
            Some(p) if !must_yield(Some(p)) => p,
            _ => return true,
        };

        if !self.preemptive {
            return false;
        }

        self.ready
            .peek()
            .is_some_and(|head| head.key < process.priority())
    }

    fn name(&self) -> &str {
        if self.preemptive {
            "Priority Scheduling (Preemptive)"
        } else {
            "Priority Scheduling (Non-preemptive)"
        }
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }
}
