/*!
 * Scheduler Types
 * Algorithm selection and time quantum configuration
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Default round-robin quantum in ticks
pub const DEFAULT_QUANTUM: Tick = 4;

/// Scheduling algorithm family, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [Self::Fcfs, Self::Sjf, Self::Priority, Self::RoundRobin];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "prio",
            Self::RoundRobin => "rr",
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "prio" | "priority" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round-robin time quantum, always at least one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeQuantum(Tick);

impl TimeQuantum {
    /// Create a quantum, rejecting non-positive values
    pub fn new(ticks: i64) -> ConfigResult<Self> {
        if ticks <= 0 {
            return Err(ConfigError::InvalidQuantum(ticks));
        }
        Ok(Self(ticks as Tick))
    }

    #[inline(always)]
    pub const fn ticks(&self) -> Tick {
        self.0
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self(DEFAULT_QUANTUM)
    }
}

impl Serialize for TimeQuantum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// Fully-parameterized algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// First-come-first-served, non-preemptive
    Fcfs,
    /// Shortest job first, non-preemptive
    Sjf,
    /// Lowest priority value first
    Priority { preemptive: bool },
    /// FIFO with a fixed quantum
    RoundRobin { quantum: TimeQuantum },
}

impl Algorithm {
    /// Build a selection from its family and the parameters the family needs
    pub fn from_kind(kind: AlgorithmKind, quantum: TimeQuantum, preemptive: bool) -> Self {
        match kind {
            AlgorithmKind::Fcfs => Self::Fcfs,
            AlgorithmKind::Sjf => Self::Sjf,
            AlgorithmKind::Priority => Self::Priority { preemptive },
            AlgorithmKind::RoundRobin => Self::RoundRobin { quantum },
        }
    }

    /// Parse an algorithm name, validating the quantum only when round-robin needs it
    pub fn parse(name: &str, quantum: i64, preemptive: bool) -> ConfigResult<Self> {
        let kind: AlgorithmKind = name.parse()?;
        let quantum = match kind {
            AlgorithmKind::RoundRobin => TimeQuantum::new(quantum)?,
            _ => TimeQuantum::default(),
        };
        Ok(Self::from_kind(kind, quantum, preemptive))
    }

    #[inline]
    pub const fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Fcfs => AlgorithmKind::Fcfs,
            Self::Sjf => AlgorithmKind::Sjf,
            Self::Priority { .. } => AlgorithmKind::Priority,
            Self::RoundRobin { .. } => AlgorithmKind::RoundRobin,
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::RoundRobin {
            quantum: TimeQuantum::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("fcfs".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Fcfs);
        assert_eq!("SJF".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Sjf);
        assert_eq!(
            "priority".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::Priority
        );
        assert_eq!(
            "round_robin".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::RoundRobin
        );
        assert_eq!(
            "lottery".parse::<AlgorithmKind>(),
            Err(ConfigError::UnknownAlgorithm("lottery".into()))
        );
    }

    #[test]
    fn test_time_quantum_validation() {
        assert_eq!(TimeQuantum::new(0), Err(ConfigError::InvalidQuantum(0)));
        assert_eq!(TimeQuantum::new(-3), Err(ConfigError::InvalidQuantum(-3)));
        assert_eq!(TimeQuantum::new(1).unwrap().ticks(), 1);
        assert_eq!(TimeQuantum::default().ticks(), DEFAULT_QUANTUM);
    }

    #[test]
    fn test_parse_only_checks_quantum_for_round_robin() {
        assert_eq!(Algorithm::parse("fcfs", 0, false).unwrap(), Algorithm::Fcfs);
        assert!(Algorithm::parse("rr", 0, false).is_err());
        assert_eq!(
            Algorithm::parse("prio", 0, true).unwrap(),
            Algorithm::Priority { preemptive: true }
        );
    }

    #[test]
    fn test_algorithm_serde() {
        let algo = Algorithm::RoundRobin {
            quantum: TimeQuantum::new(3).unwrap(),
        };
        let json = serde_json::to_string(&algo).unwrap();
        assert_eq!(json, r#"{"kind":"round_robin","quantum":3}"#);
        assert_eq!(serde_json::from_str::<Algorithm>(&json).unwrap(), algo);

        let bad = r#"{"kind":"round_robin","quantum":0}"#;
        assert!(serde_json::from_str::<Algorithm>(bad).is_err());
    }
}
