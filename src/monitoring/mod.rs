/*!
 * Monitoring
 * Log subscriber setup
 */

mod tracer;

pub use tracer::{init_tracing, ENV_TRACE_JSON};
