use std::sync::Once;

use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Build the filter for the suite: `RUST_LOG` wins, then the configured
/// level, then `info`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

static INIT: Once = Once::new();

/// Install the global tracing subscriber. Later calls are no-ops, so tests and
/// the CLI can both call this freely.
pub fn init_logging(log_level: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(build_filter(log_level))
            .with(tracing_fmt::layer().with_target(false))
            .try_init();
    });
}
