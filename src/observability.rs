//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! the embedding binary's job. These helpers cover the two setups the
//! platform runs with: human-readable output for local development and
//! JSON lines for log shipping.

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global human-readable subscriber, filtered by `RUST_LOG`
/// (default `info`).
///
/// Later calls are no-ops, so tests can call this freely.
pub fn init_tracing() {
    let _ = fmt().with_env_filter(env_filter()).try_init();
}

/// Installs the global JSON-formatted subscriber for log shipping.
pub fn init_tracing_json() {
    let _ = fmt().json().with_env_filter(env_filter()).try_init();
}
