/*!
 * Simulation Loop
 * Admission, switch overhead, preemption, dispatch, execution, completion
 */

use super::events::EventKind;
use super::stats::{CompletionRecord, StatsAccumulator};
use super::{SimulationStats, Simulator};
use crate::core::types::{Pid, Tick, FIRST_PID};
use crate::process::{Process, ProcessState};
use tracing::{debug, info, info_span, trace};

/// Charge one context switch, returning the overhead ticks to burn
#[inline]
fn begin_switch(overhead: Tick, acc: &mut StatsAccumulator) -> Tick {
    if overhead > 0 {
        acc.context_switches += 1;
    }
    overhead
}

#[inline]
fn slot(pid: Pid) -> usize {
    (pid - FIRST_PID) as usize
}

impl Simulator {
    /// Run until every process has finished and return the statistics
    pub fn run(&mut self) -> SimulationStats {
        self.reset();

        let span = info_span!(
            "simulation",
            algorithm = self.scheduler.name(),
            processes = self.processes.len(),
            overhead = self.context_switch_overhead
        );
        let _entered = span.enter();

        // Arrival order; ties keep pid order
        let mut arrivals: Vec<(Tick, Pid)> = self
            .processes
            .iter()
            .map(|p| (p.arrival_time(), p.pid()))
            .collect();
        arrivals.sort_unstable();

        let overhead = self.context_switch_overhead;
        let mut admitted = 0usize;
        let mut running: Option<Pid> = None;
        // START is stamped on the first executed tick after a dispatch
        let mut pending_start = false;
        let mut switch_remaining: Tick = 0;
        let mut first_start: Vec<Option<Tick>> = vec![None; self.processes.len()];
        let mut acc = StatsAccumulator::default();

        loop {
            // Admission
            while let Some(&(arrival, pid)) = arrivals.get(admitted) {
                if arrival > self.clock {
                    break;
                }
                if let Some(process) = self.processes.get_mut(pid) {
                    self.scheduler.admit(process);
                    trace!(pid, tick = self.clock, "admitted");
                }
                admitted += 1;
            }

            // Context-switch overhead
            if switch_remaining > 0 {
                switch_remaining -= 1;
                self.clock += 1;
                continue;
            }

            // Preemption check
            if let Some(pid) = running {
                if self
                    .scheduler
                    .needs_preemption(self.processes.get(pid), self.clock)
                {
                    if let Some(process) = self.processes.get_mut(pid) {
                        self.scheduler.preempt(process);
                        // A dispatch that never executed leaves no trace
                        if !process.is_finished() && !pending_start {
                            self.timeline.record(self.clock, pid, EventKind::Preempt);
                            debug!(
                                pid,
                                tick = self.clock,
                                remaining = process.remaining_time(),
                                "preempted"
                            );
                        }
                    }
                    running = None;
                    pending_start = false;
                    switch_remaining = begin_switch(overhead, &mut acc);
                    continue;
                }
            }

            // Dispatch
            if running.is_none() {
                match self.scheduler.next(&mut self.processes) {
                    Some(pid) => {
                        running = Some(pid);
                        pending_start = true;
                        switch_remaining = begin_switch(overhead, &mut acc);
                        debug!(pid, tick = self.clock, "dispatched");
                    }
                    None if admitted == arrivals.len() => break,
                    None => {
                        trace!(tick = self.clock, "idle");
                        self.clock += 1;
                    }
                }
                continue;
            }

            // Execute
            let Some(pid) = running else { continue };
            let Some(process) = self.processes.get_mut(pid) else {
                running = None;
                continue;
            };
            if pending_start {
                pending_start = false;
                if first_start[slot(pid)].is_none() {
                    first_start[slot(pid)] = Some(self.clock);
                }
                self.timeline.record(self.clock, pid, EventKind::Start);
            }
            process.decrement_remaining_time();
            acc.busy_ticks += 1;

            // Completion
            if process.is_finished() {
                process.set_state(ProcessState::Terminated);
                let record = completion_record(process, self.clock + 1, first_start[slot(pid)]);
                acc.record(&record);
                self.timeline
                    .record(record.completion_time, pid, EventKind::Complete);
                self.completions.push(record);
                debug!(
                    pid,
                    completion = record.completion_time,
                    turnaround = record.turnaround_time,
                    waiting = record.waiting_time,
                    "completed"
                );
                running = None;
            }

            self.clock += 1;
        }

        let stats = acc.finish(self.clock);
        info!(
            completed = stats.completed_processes,
            ticks = stats.total_ticks,
            avg_waiting = stats.avg_waiting_time,
            avg_turnaround = stats.avg_turnaround_time,
            context_switches = stats.total_context_switches,
            "simulation finished"
        );
        stats
    }

    /// Put every process back to its freshly-added state
    fn reset(&mut self) {
        self.processes.iter_mut().for_each(Process::reset);
        self.clock = 0;
        self.timeline.clear();
        self.completions.clear();
    }
}

fn completion_record(process: &Process, completion: Tick, first_start: Option<Tick>) -> CompletionRecord {
    let arrival = process.arrival_time();
    let turnaround = completion.saturating_sub(arrival);
    CompletionRecord {
        pid: process.pid(),
        arrival_time: arrival,
        burst_time: process.burst_time(),
        priority: process.priority(),
        completion_time: completion,
        turnaround_time: turnaround,
        waiting_time: turnaround.saturating_sub(process.burst_time()),
        response_time: first_start.map_or(0, |start| start.saturating_sub(arrival)),
    }
}
