//! Tracing/logging initialization for the HTTP service.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
///
/// `tower_http` emits its per-request spans at DEBUG, so request logging is
/// on by default while everything else stays at INFO.
const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
