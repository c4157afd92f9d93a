//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Logs go to stderr so they never interleave with command responses on
/// stdout. Level defaults to `warn` and is overridable via `RUST_LOG`;
/// subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
