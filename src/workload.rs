/*!
 * Workload
 * Process descriptions loaded from JSON, built in, or generated from a seed
 */

use crate::core::errors::{WorkloadError, WorkloadResult};
use crate::core::types::{Priority, Tick};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One process to be added to a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival_time: Tick,
    pub burst_time: Tick,
    #[serde(default)]
    pub priority: Priority,
}

impl ProcessSpec {
    pub const fn new(arrival_time: Tick, burst_time: Tick, priority: Priority) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority,
        }
    }
}

impl From<(Tick, Tick, Priority)> for ProcessSpec {
    fn from((arrival_time, burst_time, priority): (Tick, Tick, Priority)) -> Self {
        Self::new(arrival_time, burst_time, priority)
    }
}

/// Ordered list of processes; arrivals need not be sorted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workload {
    pub processes: Vec<ProcessSpec>,
}

/// Bounds for synthetic workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    pub count: usize,
    pub max_arrival: Tick,
    pub max_burst: Tick,
    pub max_priority: Priority,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            count: 8,
            max_arrival: 20,
            max_burst: 10,
            max_priority: 5,
        }
    }
}

impl Workload {
    pub fn new(processes: Vec<ProcessSpec>) -> Self {
        Self { processes }
    }

    /// Workload from `(arrival, burst, priority)` triples
    pub fn from_triples(triples: &[(Tick, Tick, Priority)]) -> Self {
        Self::new(triples.iter().copied().map(ProcessSpec::from).collect())
    }

    /// Four-process demo used when no workload file is given
    pub fn builtin() -> Self {
        Self::from_triples(&[(0, 5, 1), (2, 3, 2), (4, 4, 1), (6, 2, 3)])
    }

    /// Parse and validate a JSON workload
    pub fn from_json(text: &str) -> WorkloadResult<Self> {
        let workload: Self =
            serde_json::from_str(text).map_err(|e| WorkloadError::Malformed(e.to_string()))?;
        workload.validate()?;
        Ok(workload)
    }

    /// Read, parse and validate a JSON workload file
    pub fn load(path: impl AsRef<Path>) -> WorkloadResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| WorkloadError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let workload = Self::from_json(&text)?;
        info!(path = %path.display(), processes = workload.len(), "workload loaded");
        Ok(workload)
    }

    /// Deterministic pseudo-random workload
    pub fn generate(params: GeneratorParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let processes = (0..params.count)
            .map(|_| {
                ProcessSpec::new(
                    rng.gen_range(0..=params.max_arrival),
                    rng.gen_range(1..=params.max_burst.max(1)),
                    rng.gen_range(0..=params.max_priority.max(0)),
                )
            })
            .collect();
        debug!(count = params.count, seed, "workload generated");
        Self::new(processes)
    }

    /// Reject processes that could never finish
    pub fn validate(&self) -> WorkloadResult<()> {
        match self.processes.iter().position(|p| p.burst_time == 0) {
            Some(index) => Err(WorkloadError::ZeroBurst { index }),
            None => Ok(()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessSpec> {
        self.processes.iter()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Longest burst, zero for an empty workload
    pub fn max_burst(&self) -> Tick {
        self.processes.iter().map(|p| p.burst_time).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let text = r#"{"processes": [
            {"arrival_time": 0, "burst_time": 5, "priority": 1},
            {"arrival_time": 2, "burst_time": 3}
        ]}"#;
        let workload = Workload::from_json(text).unwrap();
        assert_eq!(workload.len(), 2);
        assert_eq!(workload.processes[1], ProcessSpec::new(2, 3, 0));
        assert_eq!(workload.max_burst(), 5);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Workload::from_json("{\"procs\": []}"),
            Err(WorkloadError::Malformed(_))
        ));
        assert!(matches!(
            Workload::from_json(r#"{"processes": [{"arrival_time": -1, "burst_time": 2}]}"#),
            Err(WorkloadError::Malformed(_))
        ));
        assert!(matches!(
            Workload::from_json(r#"{"processes": [{"arrival_time": 0}]}"#),
            Err(WorkloadError::Malformed(_))
        ));
    }

    #[test]
    fn test_zero_burst_rejected() {
        let text = r#"{"processes": [
            {"arrival_time": 0, "burst_time": 1},
            {"arrival_time": 1, "burst_time": 0}
        ]}"#;
        assert_eq!(
            Workload::from_json(text),
            Err(WorkloadError::ZeroBurst { index: 1 })
        );
    }

    #[test]
    fn test_generate_is_seeded() {
        let params = GeneratorParams::default();
        let a = Workload::generate(params, 42);
        let b = Workload::generate(params, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), params.count);
        assert!(a.validate().is_ok());
        assert!(a.iter().all(|p| p.burst_time <= params.max_burst
            && p.arrival_time <= params.max_arrival
            && (0..=params.max_priority).contains(&p.priority)));
    }

    #[test]
    fn test_builtin() {
        let workload = Workload::builtin();
        assert_eq!(workload.len(), 4);
        assert_eq!(workload.processes[3], ProcessSpec::new(6, 2, 3));
    }
}
