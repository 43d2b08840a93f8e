/*!
 * Process Module
 * Simulated process records and the arena that owns them
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::{Process, ProcessState};
