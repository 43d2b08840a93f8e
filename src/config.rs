/*!
 * Simulation Configuration
 * Defaults, environment layer and command-line overrides
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::Tick;
use crate::scheduler::{Algorithm, AlgorithmKind, TimeQuantum};
use serde::{Deserialize, Serialize};

pub const ENV_ALGORITHM: &str = "SCHED_SIM_ALGORITHM";
pub const ENV_QUANTUM: &str = "SCHED_SIM_QUANTUM";
pub const ENV_PREEMPTIVE: &str = "SCHED_SIM_PREEMPTIVE";
pub const ENV_CONTEXT_SWITCH: &str = "SCHED_SIM_CONTEXT_SWITCH";

/// Everything needed to construct a simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimConfig {
    pub algorithm: Algorithm,
    /// Ticks charged per context switch
    #[serde(default)]
    pub context_switch_overhead: Tick,
}

/// Optional values that replace parts of a configuration
///
/// Layers are kept raw until resolved, so a quantum set in the environment
/// still applies when the command line switches to round-robin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub algorithm: Option<String>,
    pub quantum: Option<i64>,
    pub preemptive: Option<bool>,
    pub context_switch_overhead: Option<Tick>,
}

impl Overrides {
    /// Values from the `SCHED_SIM_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Values from whatever `lookup` returns per variable
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            algorithm: lookup(ENV_ALGORITHM),
            quantum: lookup(ENV_QUANTUM)
                .map(|v| parse_value(ENV_QUANTUM, &v))
                .transpose()?,
            preemptive: lookup(ENV_PREEMPTIVE)
                .map(|v| parse_bool(ENV_PREEMPTIVE, &v))
                .transpose()?,
            context_switch_overhead: lookup(ENV_CONTEXT_SWITCH)
                .map(|v| parse_value(ENV_CONTEXT_SWITCH, &v))
                .transpose()?,
        })
    }

    /// Layer `later` on top; every field it sets wins
    pub fn merge(self, later: Overrides) -> Self {
        Self {
            algorithm: later.algorithm.or(self.algorithm),
            quantum: later.quantum.or(self.quantum),
            preemptive: later.preemptive.or(self.preemptive),
            context_switch_overhead: later
                .context_switch_overhead
                .or(self.context_switch_overhead),
        }
    }

    /// Defaults with these values applied
    pub fn resolve(self) -> ConfigResult<SimConfig> {
        SimConfig::default().apply(self)
    }

    /// One configuration per algorithm family, sharing every other value
    pub fn all_algorithms(&self) -> ConfigResult<Vec<SimConfig>> {
        AlgorithmKind::ALL
            .iter()
            .map(|kind| {
                Overrides {
                    algorithm: Some(kind.as_str().to_string()),
                    ..self.clone()
                }
                .resolve()
            })
            .collect()
    }
}

impl SimConfig {
    pub fn new(algorithm: Algorithm, context_switch_overhead: Tick) -> Self {
        Self {
            algorithm,
            context_switch_overhead,
        }
    }

    /// Replace whatever the overrides set, re-validating the algorithm
    ///
    /// A supplied quantum is validated even when round-robin is not selected.
    pub fn apply(self, overrides: Overrides) -> ConfigResult<Self> {
        let kind = match overrides.algorithm.as_deref() {
            Some(name) => name.parse::<AlgorithmKind>()?,
            None => self.algorithm.kind(),
        };

        let quantum = match overrides.quantum {
            Some(ticks) => TimeQuantum::new(ticks)?,
            None => self.quantum().unwrap_or_default(),
        };
        let preemptive = overrides
            .preemptive
            .unwrap_or_else(|| self.preemptive().unwrap_or(true));

        Ok(Self {
            algorithm: Algorithm::from_kind(kind, quantum, preemptive),
            context_switch_overhead: overrides
                .context_switch_overhead
                .unwrap_or(self.context_switch_overhead),
        })
    }

    /// Round-robin quantum, if round-robin is selected
    pub fn quantum(&self) -> Option<TimeQuantum> {
        match self.algorithm {
            Algorithm::RoundRobin { quantum } => Some(quantum),
            _ => None,
        }
    }

    /// Preemption mode, if priority scheduling is selected
    pub fn preemptive(&self) -> Option<bool> {
        match self.algorithm {
            Algorithm::Priority { preemptive } => Some(preemptive),
            _ => None,
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
