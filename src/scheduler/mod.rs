/*!
 * Scheduler Module
 * Interchangeable dispatch policies behind one trait
 */

mod entry;
pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod traits;
pub mod types;

// Re-export public API
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use traits::Scheduler;
pub use types::{Algorithm, AlgorithmKind, TimeQuantum, DEFAULT_QUANTUM};

/// Construct the policy for an algorithm selection
pub fn build(algorithm: Algorithm) -> Box<dyn Scheduler> {
    match algorithm {
        Algorithm::Fcfs => Box::new(FcfsScheduler::new()),
        Algorithm::Sjf => Box::new(SjfScheduler::new()),
        Algorithm::Priority { preemptive } => Box::new(PriorityScheduler::new(preemptive)),
        Algorithm::RoundRobin { quantum } => Box::new(RoundRobinScheduler::new(quantum)),
    }
}
