/*!
 * CPU Scheduling Simulator - Command Line Entry Point
 *
 * Runs one scheduling algorithm (or all of them) over a workload and
 * prints per-process timings, aggregate metrics and an optional timeline.
 */

use clap::Parser;
use miette::IntoDiagnostic;
use std::path::PathBuf;
use tracing::info;

use cpu_sched_sim::report::{self, ComparisonRow, Report};
use cpu_sched_sim::{init_tracing, GeneratorParams, Overrides, Simulator, Tick, Workload};

#[derive(Parser, Debug)]
#[command(name = "cpu-sched-sim", version, about = "CPU scheduling simulator")]
struct Cli {
    /// Scheduling algorithm: fcfs, sjf, prio, rr
    #[arg(short = 'a', long = "algo", value_name = "ALGO")]
    algo: Option<String>,

    /// Round-robin time quantum in ticks
    #[arg(short = 'q', long, allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Context-switch overhead in ticks
    #[arg(short = 'c', long = "context-switch", value_name = "TICKS")]
    context_switch: Option<Tick>,

    /// Preemptive priority scheduling
    #[arg(short = 'p', long, conflicts_with = "non_preemptive")]
    preemptive: bool,

    /// Non-preemptive priority scheduling
    #[arg(long)]
    non_preemptive: bool,

    /// JSON workload file
    #[arg(short = 'w', long, value_name = "FILE")]
    workload: Option<PathBuf>,

    /// Generate a random workload with this many processes
    #[arg(long, value_name = "COUNT", conflicts_with = "workload")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the scheduling timeline
    #[arg(short = 't', long)]
    timeline: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Run every algorithm on the workload and compare
    #[arg(long)]
    compare: bool,

    /// Debug-level logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let preemptive = match (self.preemptive, self.non_preemptive) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Overrides {
            algorithm: self.algo.clone(),
            quantum: self.quantum,
            preemptive,
            context_switch_overhead: self.context_switch,
        }
    }

    fn workload(&self) -> miette::Result<Workload> {
        if let Some(path) = &self.workload {
            return Ok(Workload::load(path)?);
        }
        if let Some(count) = self.random {
            let params = GeneratorParams {
                count,
                ..GeneratorParams::default()
            };
            return Ok(Workload::generate(params, self.seed));
        }
        Ok(Workload::builtin())
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "info" });

    // Everything is validated before any simulator exists
    let overrides = Overrides::from_env()?.merge(cli.overrides());
    let config = overrides.clone().resolve()?;
    let workload = cli.workload()?;
    info!(processes = workload.len(), algorithm = ?config.algorithm, "configuration ready");

    if cli.compare {
        let rows: Vec<ComparisonRow> = overrides
            .all_algorithms()?
            .iter()
            .map(|cfg| {
                let mut sim = Simulator::from_config(cfg);
                sim.add_workload(&workload);
                let stats = sim.run();
                ComparisonRow {
                    algorithm: sim.scheduler_name().to_string(),
                    stats,
                }
            })
            .collect();

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
        } else {
            print!("{}", report::render_comparison(&rows).into_diagnostic()?);
        }
        return Ok(());
    }

    let mut sim = Simulator::from_config(&config);
    sim.add_workload(&workload);
    let stats = sim.run();

    if cli.json {
        let json = Report::new(&sim, config, stats).to_json().into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!("\nSimulation Results: {}", sim.scheduler_name());
    println!("==================\n");
    print!("{}", report::render_process_table(sim.completions()).into_diagnostic()?);
    print!("{}", report::render_metrics(&stats).into_diagnostic()?);
    if cli.timeline {
        let chart = report::render_timeline(sim.timeline(), stats.total_ticks).into_diagnostic()?;
        println!("{}", chart);
    }

    Ok(())
}
