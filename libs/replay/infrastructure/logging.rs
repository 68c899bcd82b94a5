//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize tracing at a given level (error, warn, info, debug, trace)
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()));

    // try_init so a second call (e.g. chained binaries in one process) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .try_init();
}
