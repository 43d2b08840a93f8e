/*!
 * Simulation Statistics
 * Per-process completion records and run-level averages
 */

use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timing of one finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub priority: Priority,
    /// Tick at which the last unit of work finished
    pub completion_time: Tick,
    pub turnaround_time: Tick,
    pub waiting_time: Tick,
    pub response_time: Tick,
}

/// Aggregate result of a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    pub total_context_switches: u64,
    pub completed_processes: usize,
    /// Clock value when the run terminated
    pub total_ticks: Tick,
    /// Ticks spent executing process work
    pub busy_ticks: Tick,
}

impl SimulationStats {
    /// Share of ticks the CPU spent doing work, in `[0, 1]`
    pub fn cpu_utilization(&self) -> f64 {
        if self.total_ticks == 0 {
            0.0
        } else {
            self.busy_ticks as f64 / self.total_ticks as f64
        }
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Waiting Time: {:.2}", self.avg_waiting_time)?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.avg_turnaround_time)?;
        writeln!(f, "Average Response Time: {:.2}", self.avg_response_time)?;
        writeln!(f, "Total Context Switches: {}", self.total_context_switches)?;
        write!(f, "Completed Processes: {}", self.completed_processes)
    }
}

/// Running sums, local to one run
#[derive(Debug, Default)]
pub(super) struct StatsAccumulator {
    waiting: u64,
    turnaround: u64,
    response: u64,
    completed: usize,
    pub context_switches: u64,
    pub busy_ticks: Tick,
}

impl StatsAccumulator {
    pub fn record(&mut self, record: &CompletionRecord) {
        self.waiting += record.waiting_time;
        self.turnaround += record.turnaround_time;
        self.response += record.response_time;
        self.completed += 1;
    }

    /// Divide the sums once; no division when nothing completed
    pub fn finish(self, total_ticks: Tick) -> SimulationStats {
        let mut stats = SimulationStats {
            total_context_switches: self.context_switches,
            completed_processes: self.completed,
            total_ticks,
            busy_ticks: self.busy_ticks,
            ..SimulationStats::default()
        };

        if self.completed > 0 {
            let n = self.completed as f64;
            stats.avg_waiting_time = self.waiting as f64 / n;
            stats.avg_turnaround_time = self.turnaround as f64 / n;
            stats.avg_response_time = self.response as f64 / n;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: Pid, turnaround: Tick, waiting: Tick) -> CompletionRecord {
        CompletionRecord {
            pid,
            arrival_time: 0,
            burst_time: turnaround - waiting,
            priority: 0,
            completion_time: turnaround,
            turnaround_time: turnaround,
            waiting_time: waiting,
            response_time: waiting,
        }
    }

    #[test]
    fn test_empty_accumulator() {
        let stats = StatsAccumulator::default().finish(0);
        assert_eq!(stats, SimulationStats::default());
        assert_eq!(stats.cpu_utilization(), 0.0);
    }

    #[test]
    fn test_averages() {
        let mut acc = StatsAccumulator::default();
        acc.record(&record(1, 5, 0));
        acc.record(&record(2, 6, 3));
        acc.busy_ticks = 8;
        let stats = acc.finish(10);
        assert_eq!(stats.completed_processes, 2);
        assert_eq!(stats.avg_turnaround_time, 5.5);
        assert_eq!(stats.avg_waiting_time, 1.5);
        assert_eq!(stats.cpu_utilization(), 0.8);
    }

    #[test]
    fn test_display() {
        let stats = SimulationStats {
            avg_waiting_time: 1.0,
            avg_turnaround_time: 2.5,
            completed_processes: 3,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Average Waiting Time: 1.00"));
        assert!(text.contains("Average Turnaround Time: 2.50"));
        assert!(text.ends_with("Completed Processes: 3"));
    }
}
