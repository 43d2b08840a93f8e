/*!
 * Process Table
 * Pid-indexed arena owning every process of a simulation
 */

use super::types::Process;
use crate::core::types::{Pid, Priority, Tick, FIRST_PID};

/// Arena of processes keyed by pid
///
/// Pids are dense and sequential, so a pid maps straight to a slot.
/// Schedulers only ever hold pids; all field mutation goes through here.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a process with the next pid and return that pid
    pub fn spawn(&mut self, arrival_time: Tick, burst_time: Tick, priority: Priority) -> Pid {
        let pid = FIRST_PID + self.processes.len() as Pid;
        self.processes
            .push(Process::new(pid, arrival_time, burst_time, priority));
        pid
    }

    #[inline]
    fn slot(pid: Pid) -> Option<usize> {
        pid.checked_sub(FIRST_PID).map(|i| i as usize)
    }

    #[inline]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        Self::slot(pid).and_then(|i| self.processes.get(i))
    }

    #[inline]
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        Self::slot(pid).and_then(move |i| self.processes.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// True once every process has run to completion
    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }
}
