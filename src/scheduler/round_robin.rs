/*!
 * Round-Robin Scheduling
 * FIFO dispatch with a fixed time quantum
 */

use super::traits::{dispatch, must_yield, Scheduler};
use super::types::TimeQuantum;
use crate::core::types::{Pid, Tick};
use crate::process::{Process, ProcessState, ProcessTable};
use std::collections::VecDeque;
use tracing::trace;

/// Round-robin dispatch
///
/// The slice is measured in executed ticks: the remaining work at dispatch
/// is remembered, so context-switch overhead ticks never eat into it.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    ready: VecDeque<Pid>,
    quantum: TimeQuantum,
    label: String,
    // Remaining work of the running process when it was dispatched
    slice_start: Option<Tick>,
}

impl RoundRobinScheduler {
    pub fn new(quantum: TimeQuantum) -> Self {
        Self {
            ready: VecDeque::new(),
            quantum,
            label: format!("Round Robin (Q={})", quantum.ticks()),
            slice_start: None,
        }
    }

    #[inline]
    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }

    /// Ticks `process` has executed since its last dispatch
    pub fn slice_elapsed(&self, process: &Process) -> Tick {
        self.slice_start
            .map_or(0, |start| start.saturating_sub(process.remaining_time()))
    }
}

impl Scheduler for RoundRobinScheduler {
    fn admit(&mut self, process: &mut Process) {
        process.set_state(ProcessState::Ready);
        self.ready.push_back(process.pid());
        trace!(pid = process.pid(), queued = self.ready.len(), "rr admit");
    }

    fn next(&mut self, table: &mut ProcessTable) -> Option<Pid> {
        let pid = self.ready.pop_front()?;
        self.slice_start = table.get(pid).map(Process::remaining_time);
        Some(dispatch(table, pid))
    }

    fn preempt(&mut self, process: &mut Process) {
        if !process.is_finished() {
            self.admit(process);
        }
        self.slice_start = None;
    }

    fn needs_preemption(&self, process: Option<&Process>, _current_tick: Tick) -> bool {
        match process {
            Some(p) if !must_yield(Some(p)) => self.slice_elapsed(p) >= self.quantum.ticks(),
            _ => true,
        }
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantum(ticks: i64) -> TimeQuantum {
        TimeQuantum::new(ticks).unwrap()
    }

    #[test]
    fn test_quantum_expiry() {
        let mut table = ProcessTable::new();
        table.spawn(0, 5, 0);
        let mut s = RoundRobinScheduler::new(quantum(2));
        s.admit(table.get_mut(1).unwrap());
        assert_eq!(s.next(&mut table), Some(1));

        assert!(!s.needs_preemption(table.get(1), 0));
        table.get_mut(1).unwrap().decrement_remaining_time();
        assert!(!s.needs_preemption(table.get(1), 1));
        table.get_mut(1).unwrap().decrement_remaining_time();
        assert!(s.needs_preemption(table.get(1), 2));
    }

    #[test]
    fn test_preempt_rotates_and_resets_slice() {
        let mut table = ProcessTable::new();
        table.spawn(0, 5, 0);
        table.spawn(0, 5, 0);
        let mut s = RoundRobinScheduler::new(quantum(1));
        s.admit(table.get_mut(1).unwrap());
        s.admit(table.get_mut(2).unwrap());

        assert_eq!(s.next(&mut table), Some(1));
        table.get_mut(1).unwrap().decrement_remaining_time();
        assert_eq!(s.slice_elapsed(table.get(1).unwrap()), 1);

        s.preempt(table.get_mut(1).unwrap());
        assert_eq!(s.slice_elapsed(table.get(1).unwrap()), 0);
        assert_eq!(s.next(&mut table), Some(2));
        assert_eq!(s.next(&mut table), Some(1));
    }

    #[test]
    fn test_predicate_is_pure() {
        let mut table = ProcessTable::new();
        table.spawn(0, 5, 0);
        let mut s = RoundRobinScheduler::new(quantum(3));
        s.admit(table.get_mut(1).unwrap());
        s.next(&mut table);
        for tick in 0..10 {
            assert!(!s.needs_preemption(table.get(1), tick));
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(RoundRobinScheduler::new(quantum(4)).name(), "Round Robin (Q=4)");
    }
}
