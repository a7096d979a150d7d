//! Observability: metrics counters and logging setup.

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{LoadOutcome, MetricsTracker, Timer};
