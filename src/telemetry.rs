//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Installs the process-wide JSON subscriber.
///
/// `RUST_LOG` wins over `log_level` when set. Safe to call more than once;
/// later calls are no-ops.
pub fn init(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .try_init();
}
