//! Logging setup.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured log level applies.
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
