/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (assigned sequentially from 1)
pub type Pid = u32;

/// Simulation time, in whole ticks
pub type Tick = u64;

/// Priority level (lower is more urgent, may be negative)
pub type Priority = i32;

/// First pid handed out by a simulator
pub const FIRST_PID: Pid = 1;
