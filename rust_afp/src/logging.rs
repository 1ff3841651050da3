//! Logging setup for the command line tools.

use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr at the given level
///
/// RUST_LOG takes precedence over log_level when it is set.
/// Calling this more than once has no effect.
pub fn init(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
