/*!
 * Scheduler Traits
 * Dispatch policy contract shared by every algorithm
 */

use crate::core::types::{Pid, Tick};
use crate::process::{Process, ProcessState, ProcessTable};

/// A dispatch policy over a ready set of pids
///
/// The ready set is owned by the policy. Process records stay in the
/// simulator's [`ProcessTable`]; only the process handed to an operation
/// (or the one `next` selects) is mutated.
pub trait Scheduler: Send {
    /// Insert a newly arrived process into the ready set
    fn admit(&mut self, process: &mut Process);

    /// Remove the policy's choice from the ready set and mark it running
    fn next(&mut self, table: &mut ProcessTable) -> Option<Pid>;

    /// Take the CPU away from `process`; reinserted only if work remains
    fn preempt(&mut self, process: &mut Process);

    /// Whether the running process must yield before its next tick
    ///
    /// Always true for an absent or finished process.
    fn needs_preemption(&self, process: Option<&Process>, current_tick: Tick) -> bool;

    /// Descriptive label
    fn name(&self) -> &str;

    /// Number of processes waiting in the ready set
    fn ready_len(&self) -> usize;
}

/// Absent or finished processes always give up the CPU
#[inline]
pub(super) fn must_yield(process: Option<&Process>) -> bool {
    process.map_or(true, Process::is_finished)
}

/// Flip the selected process to running and hand back its pid
#[inline]
pub(super) fn dispatch(table: &mut ProcessTable, pid: Pid) -> Pid {
    if let Some(process) = table.get_mut(pid) {
        process.set_state(ProcessState::Running);
    }
    pid
}
