//! Tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber with `CLARITY_LOG` env-filter support.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env("CLARITY_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
