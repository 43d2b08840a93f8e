/*!
 * Shortest-Job-First
 * Non-preemptive dispatch by remaining work at admission
 */

use super::entry::KeyedQueue;
use super::traits::{dispatch, must_yield, Scheduler};
use crate::core::types::{Pid, Tick};
use crate::process::{Process, ProcessState, ProcessTable};
use tracing::trace;

/// Ready set keyed by `remaining_time` as of admission
///
/// A shorter job arriving later never displaces the running one.
#[derive(Debug)]
pub struct SjfScheduler {
    ready: KeyedQueue<Tick>,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self {
            ready: KeyedQueue::new(),
        }
    }
}

impl Default for SjfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SjfScheduler {
    fn admit(&mut self, process: &mut Process) {
        process.set_state(ProcessState::Ready);
        self.ready.push(process.pid(), process.remaining_time());
        trace!(
            pid = process.pid(),
            remaining = process.remaining_time(),
            "sjf admit"
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
        must_yield(process)
    }

    fn name(&self) -> &str {
        "Shortest Job First"
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_first() {
        let mut table = ProcessTable::new();
        for burst in [5, 2, 3] {
            table.spawn(0, burst, 1);
        }
        let mut s = SjfScheduler::new();
        for pid in 1..=3 {
            s.admit(table.get_mut(pid).unwrap());
        }
        let pids: Vec<Pid> = std::iter::from_fn(|| s.next(&mut table)).collect();
        let order: Vec<Tick> = pids
            .iter()
            .map(|&pid| table.get(pid).unwrap().burst_time())
            .collect();
        assert_eq!(order, vec![2, 3, 5]);
    }

    #[test]
    fn test_equal_bursts_in_admission_order() {
        let mut table = ProcessTable::new();
        for _ in 0..3 {
            table.spawn(0, 4, 0);
        }
        let mut s = SjfScheduler::new();
        for pid in [3, 1, 2] {
            s.admit(table.get_mut(pid).unwrap());
        }
        assert_eq!(s.next(&mut table), Some(3));
        assert_eq!(s.next(&mut table), Some(1));
        assert_eq!(s.next(&mut table), Some(2));
    }

    #[test]
    fn test_shorter_arrival_does_not_preempt() {
        let mut table = ProcessTable::new();
        table.spawn(0, 10, 0);
        table.spawn(1, 1, 0);
        let mut s = SjfScheduler::new();
        s.admit(table.get_mut(1).unwrap());
        assert_eq!(s.next(&mut table), Some(1));
        s.admit(table.get_mut(2).unwrap());
        assert!(!s.needs_preemption(table.get(1), 1));
    }
}
