/*!
 * Simulator
 * Discrete-tick driver that feeds a scheduler and measures the outcome
 */

use crate::config::SimConfig;
use crate::core::types::{Pid, Priority, Tick};
use crate::process::ProcessTable;
use crate::scheduler::{self, Algorithm, Scheduler};
use crate::workload::Workload;
use tracing::debug;

pub mod events;
mod run;
pub mod stats;

pub use events::{EventKind, Segment, Timeline, TimelineEvent};
pub use stats::{CompletionRecord, SimulationStats};

/// Single-CPU scheduling simulation
///
/// Owns every process for the whole run; the scheduler only ever sees
/// pids and the process it is asked about. Runs are deterministic and
/// repeatable: each call to [`Simulator::run`] starts from a clean clock.
pub struct Simulator {
    scheduler: Box<dyn Scheduler>,
    processes: ProcessTable,
    context_switch_overhead: Tick,
    clock: Tick,
    timeline: Timeline,
    completions: Vec<CompletionRecord>,
}

impl Simulator {
    /// Create a simulator around an already-built scheduler
    pub fn new(scheduler: Box<dyn Scheduler>, context_switch_overhead: Tick) -> Self {
        Self {
            scheduler,
            processes: ProcessTable::new(),
            context_switch_overhead,
            clock: 0,
            timeline: Timeline::new(),
            completions: Vec::new(),
        }
    }

    pub fn with_algorithm(algorithm: Algorithm, context_switch_overhead: Tick) -> Self {
        Self::new(scheduler::build(algorithm), context_switch_overhead)
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::with_algorithm(config.algorithm, config.context_switch_overhead)
    }

    /// Add a process and return its pid
    ///
    /// `burst_time` must be positive; workloads are validated before they
    /// reach this point.
    pub fn add_process(&mut self, arrival_time: Tick, burst_time: Tick, priority: Priority) -> Pid {
        debug_assert!(burst_time > 0, "burst time must be positive");
        let pid = self.processes.spawn(arrival_time, burst_time, priority);
        debug!(pid, arrival_time, burst_time, priority, "process added");
        pid
    }

    /// Add every process of a workload, in order
    pub fn add_workload(&mut self, workload: &Workload) {
        for spec in workload.iter() {
            self.add_process(spec.arrival_time, spec.burst_time, spec.priority);
        }
    }

    /// Clock value at the end of the last run
    #[inline]
    pub fn current_time(&self) -> Tick {
        self.clock
    }

    #[inline]
    pub fn context_switch_overhead(&self) -> Tick {
        self.context_switch_overhead
    }

    pub fn scheduler_name(&self) -> &str {
        self.scheduler.name()
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Finished processes of the last run, in completion order
    pub fn completions(&self) -> &[CompletionRecord] {
        &self.completions
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessState;
    use crate::scheduler::TimeQuantum;

    fn rr(q: i64) -> Algorithm {
        Algorithm::RoundRobin {
            quantum: TimeQuantum::new(q).unwrap(),
        }
    }

    #[test]
    fn test_empty_workload() {
        let mut sim = Simulator::with_algorithm(Algorithm::Fcfs, 0);
        let stats = sim.run();
        assert_eq!(stats, SimulationStats::default());
        assert!(sim.timeline().is_empty());
        assert_eq!(sim.current_time(), 0);
    }

    #[test]
    fn test_single_process() {
        let mut sim = Simulator::with_algorithm(Algorithm::Fcfs, 0);
        sim.add_process(0, 5, 1);
        let stats = sim.run();

        assert_eq!(stats.completed_processes, 1);
        assert_eq!(stats.avg_waiting_time, 0.0);
        assert_eq!(stats.avg_turnaround_time, 5.0);
        assert_eq!(stats.avg_response_time, 0.0);
        assert_eq!(stats.total_context_switches, 0);
        assert_eq!(sim.current_time(), 5);
        assert_eq!(
            sim.processes().get(1).map(|p| p.state()),
            Some(ProcessState::Terminated)
        );
    }

    #[test]
    fn test_idle_gap_before_late_arrival() {
        let mut sim = Simulator::with_algorithm(Algorithm::Fcfs, 0);
        sim.add_process(3, 2, 0);
        let stats = sim.run();

        assert_eq!(stats.avg_turnaround_time, 2.0);
        assert_eq!(stats.total_ticks, 5);
        assert_eq!(stats.busy_ticks, 2);
        assert_eq!(sim.timeline().events()[0].tick, 3);
    }

    #[test]
    fn test_round_robin_interleaves() {
        let mut sim = Simulator::with_algorithm(rr(2), 0);
        sim.add_process(0, 3, 0);
        sim.add_process(0, 3, 0);
        sim.run();

        assert_eq!(sim.timeline().dispatch_order(), vec![1, 2, 1, 2]);
        assert_eq!(sim.timeline().completion_order(), vec![1, 2]);
        let finish: Vec<Tick> = sim.completions().iter().map(|c| c.completion_time).collect();
        assert_eq!(finish, vec![5, 6]);
    }

    #[test]
    fn test_context_switch_overhead() {
        let mut sim = Simulator::with_algorithm(Algorithm::Fcfs, 1);
        sim.add_process(0, 2, 0);
        sim.add_process(0, 2, 0);
        let stats = sim.run();

        // switch(0) run(1,2) switch(3) run(4,5)
        assert_eq!(stats.total_context_switches, 2);
        assert_eq!(stats.total_ticks, 6);
        assert_eq!(stats.busy_ticks, 4);
        let turnaround: Vec<Tick> = sim.completions().iter().map(|c| c.turnaround_time).collect();
        assert_eq!(turnaround, vec![3, 6]);
        assert_eq!(sim.completions()[1].response_time, 4);
    }

    #[test]
    fn test_zero_overhead_counts_no_switches() {
        let mut sim = Simulator::with_algorithm(rr(1), 0);
        sim.add_process(0, 3, 0);
        sim.add_process(0, 3, 0);
        let stats = sim.run();
        assert_eq!(stats.total_context_switches, 0);
        assert_eq!(stats.completed_processes, 2);
    }

    #[test]
    fn test_rerun_is_identical() {
        let mut sim = Simulator::with_algorithm(Algorithm::Priority { preemptive: true }, 1);
        sim.add_process(0, 4, 3);
        sim.add_process(1, 2, 1);
        sim.add_process(2, 3, 2);
        let first = sim.run();
        let first_events = sim.timeline().clone();
        let second = sim.run();

        assert_eq!(first, second);
        assert_eq!(first_events.events(), sim.timeline().events());
    }
}
