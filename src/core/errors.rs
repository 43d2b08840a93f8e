/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, raised before any simulator is constructed
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Unknown scheduling algorithm '{0}'")]
    #[diagnostic(
        code(config::unknown_algorithm),
        help("Valid algorithms: fcfs, sjf, prio, rr.")
    )]
    UnknownAlgorithm(String),

    #[error("Invalid time quantum: {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("Round-robin quantum must be a positive number of ticks.")
    )]
    InvalidQuantum(i64),

    #[error("Invalid value '{value}' for {key}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Check the environment variable or command-line flag.")
    )]
    InvalidValue { key: String, value: String },
}

/// Workload errors, raised before any simulation state is built
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WorkloadError {
    #[error("Cannot read workload file {path}: {reason}")]
    #[diagnostic(
        code(workload::unreadable),
        help("Check that the file exists and is readable.")
    )]
    Unreadable { path: String, reason: String },

    #[error("Malformed workload: {0}")]
    #[diagnostic(
        code(workload::malformed),
        help("Expected an object with a 'processes' array of arrival_time, burst_time and priority entries.")
    )]
    Malformed(String),

    #[error("Process #{index} has zero burst time")]
    #[diagnostic(
        code(workload::zero_burst),
        help("Every process needs at least one tick of CPU work.")
    )]
    ZeroBurst { index: usize },
}

/// Top-level simulator error
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Workload(#[from] WorkloadError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type WorkloadResult<T> = Result<T, WorkloadError>;
pub type SimResult<T> = Result<T, SimError>;
