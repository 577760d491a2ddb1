//! Structured logging setup.
//!
//! Dispatch diagnostics use `tracing` throughout; this module wires up
//! a fmt subscriber with `RUST_LOG`-style filtering for hosts that do
//! not bring their own.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber. Call once at startup.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .init();
}

/// Like [`init`] but tolerates an already-installed subscriber; meant
/// for tests where initialization order is unpredictable.
pub fn try_init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
        .ok();
}
