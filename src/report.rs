/*!
 * Reporting
 * Text and JSON renderings of a finished simulation
 */

use crate::config::SimConfig;
use crate::core::types::{Pid, Tick};
use crate::simulator::{CompletionRecord, SimulationStats, Simulator, Timeline, TimelineEvent};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Everything a run produced, ready for serialization
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub algorithm: &'a str,
    pub config: SimConfig,
    pub stats: SimulationStats,
    pub processes: &'a [CompletionRecord],
    pub events: &'a [TimelineEvent],
}

impl<'a> Report<'a> {
    pub fn new(sim: &'a Simulator, config: SimConfig, stats: SimulationStats) -> Self {
        Self {
            algorithm: sim.scheduler_name(),
            config,
            stats,
            processes: sim.completions(),
            events: sim.timeline().events(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One line of an algorithm comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub algorithm: String,
    pub stats: SimulationStats,
}

pub fn render_metrics(stats: &SimulationStats) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "\nPerformance Metrics:")?;
    writeln!(out, "==================\n")?;
    writeln!(out, "Average Waiting Time:     {:.2} units", stats.avg_waiting_time)?;
    writeln!(out, "Average Turnaround Time:  {:.2} units", stats.avg_turnaround_time)?;
    writeln!(out, "Average Response Time:    {:.2} units", stats.avg_response_time)?;
    writeln!(out, "Total Context Switches:   {}", stats.total_context_switches)?;
    writeln!(out, "Completed Processes:      {}", stats.completed_processes)?;
    writeln!(out, "CPU Utilization:          {:.2}%", stats.cpu_utilization() * 100.0)?;
    Ok(out)
}

/// Per-process table, ordered by pid
pub fn render_process_table(records: &[CompletionRecord]) -> Result<String, fmt::Error> {
    let mut rows: Vec<&CompletionRecord> = records.iter().collect();
    rows.sort_by_key(|r| r.pid);

    let mut out = String::new();
    writeln!(
        out,
        "{:>5} {:>8} {:>6} {:>5} {:>7} {:>11} {:>8} {:>9}",
        "PID", "Arrival", "Burst", "Prio", "Finish", "Turnaround", "Waiting", "Response"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:>5} {:>8} {:>6} {:>5} {:>7} {:>11} {:>8} {:>9}",
            r.pid,
            r.arrival_time,
            r.burst_time,
            r.priority,
            r.completion_time,
            r.turnaround_time,
            r.waiting_time,
            r.response_time
        )?;
    }
    Ok(out)
}

/// ASCII Gantt chart: `=` where a process held the CPU, `.` elsewhere
pub fn render_timeline(timeline: &Timeline, total_ticks: Tick) -> Result<String, fmt::Error> {
    if timeline.is_empty() || total_ticks == 0 {
        return Ok("No events recorded.".to_string());
    }

    let width = total_ticks as usize;
    let mut lines: BTreeMap<Pid, Vec<char>> = timeline
        .events()
        .iter()
        .map(|e| (e.pid, vec!['.'; width]))
        .collect();

    for segment in timeline.segments() {
        if let Some(line) = lines.get_mut(&segment.pid) {
            let end = (segment.end as usize).min(width);
            for cell in &mut line[(segment.start as usize).min(end)..end] {
                *cell = '=';
            }
        }
    }

    let mut out = String::new();
    writeln!(out, "\nScheduling Timeline:")?;
    writeln!(out, "================\n")?;
    write!(out, "Time: ")?;
    for t in 0..width {
        write!(out, "{:>3}", t)?;
    }
    out.push('\n');

    for (pid, line) in &lines {
        write!(out, "P{:>3}: ", pid)?;
        for c in line {
            write!(out, "{:>3}", c)?;
        }
        out.push('\n');
    }
    Ok(out)
}

/// One summary row per algorithm
pub fn render_comparison(rows: &[ComparisonRow]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:<36} {:>9} {:>11} {:>9} {:>9} {:>7}",
        "Algorithm", "Waiting", "Turnaround", "Response", "Switches", "CPU%"
    )?;
    for row in rows {
        let s = &row.stats;
        writeln!(
            out,
            "{:<36} {:>9.2} {:>11.2} {:>9.2} {:>9} {:>7.1}",
            row.algorithm,
            s.avg_waiting_time,
            s.avg_turnaround_time,
            s.avg_response_time,
            s.total_context_switches,
            s.cpu_utilization() * 100.0
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Algorithm;
    use crate::simulator::EventKind;

    #[test]
    fn test_timeline_bars() {
        let mut t = Timeline::new();
        t.record(0, 1, EventKind::Start);
        t.record(2, 1, EventKind::Complete);
        t.record(2, 2, EventKind::Start);
        t.record(3, 2, EventKind::Complete);

        let text = render_timeline(&t, 3).unwrap();
        assert!(text.contains("P  1:   =  =  ."));
        assert!(text.contains("P  2:   .  .  ="));
    }

    #[test]
    fn test_empty_timeline() {
        assert_eq!(render_timeline(&Timeline::new(), 0).unwrap(), "No events recorded.");
    }

    #[test]
    fn test_metrics_and_json() {
        let config = SimConfig::new(Algorithm::Fcfs, 0);
        let mut sim = Simulator::from_config(&config);
        sim.add_process(0, 4, 0);
        let stats = sim.run();

        let metrics = render_metrics(&stats).unwrap();
        assert!(metrics.contains("Average Turnaround Time:  4.00 units"));
        assert!(metrics.contains("CPU Utilization:          100.00%"));

        let json = Report::new(&sim, config, stats).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "First Come First Serve");
        assert_eq!(value["stats"]["completed_processes"], 1);
        assert_eq!(value["events"][1]["kind"], "COMPLETE");
        assert_eq!(value["processes"][0]["turnaround_time"], 4);
    }

    #[test]
    fn test_process_table_sorted_by_pid() {
        let mut sim = Simulator::with_algorithm(Algorithm::Sjf, 0);
        sim.add_process(0, 5, 0);
        sim.add_process(0, 1, 0);
        sim.run();
        let table = render_process_table(sim.completions()).unwrap();
        let first = table.lines().nth(1).unwrap();
        assert!(first.trim_start().starts_with('1'));
    }

    #[test]
    fn test_comparison_rows() {
        let rows: Vec<ComparisonRow> = [Algorithm::Fcfs, Algorithm::Sjf]
            .into_iter()
            .map(|algo| {
                let mut sim = Simulator::with_algorithm(algo, 0);
                sim.add_process(0, 2, 0);
                let stats = sim.run();
                ComparisonRow {
                    algorithm: sim.scheduler_name().to_string(),
                    stats,
                }
            })
            .collect();

        let text = render_comparison(&rows).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Algorithm"));
        assert!(lines[1].starts_with("First Come First Serve"));
        assert!(lines[2].starts_with("Shortest Job First"));
    }
}
