//! Logging setup.
//!
//! One `tracing` subscriber for the whole process, filtered by `RUST_LOG`
//! with an `info` default.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
