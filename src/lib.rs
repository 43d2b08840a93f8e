/*!
 * CPU Scheduling Simulator Library
 * Dispatch policies, the discrete-tick simulator and its reporting
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;
pub mod simulator;
pub mod workload;

// Re-exports
pub use config::{Overrides, SimConfig};
pub use crate::core::errors::{ConfigError, SimError, SimResult, WorkloadError};
pub use crate::core::types::{Pid, Priority, Tick};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessState, ProcessTable};
pub use scheduler::{Algorithm, AlgorithmKind, Scheduler, TimeQuantum};
pub use simulator::{
    CompletionRecord, EventKind, SimulationStats, Simulator, Timeline, TimelineEvent,
};
pub use workload::{GeneratorParams, ProcessSpec, Workload};
