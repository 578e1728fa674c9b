//! Logging setup

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber at `level`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn configure_logging(level: Level) {
    let filter = EnvFilter::new(level.as_str().to_lowercase());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
