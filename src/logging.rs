//! Tracing setup. Logs go to stderr so stdout carries only the response.

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::config::{get_log_level, DEFAULT_LOG_LEVEL, VERBOSE_LOG_LEVEL};

/// Level filter for this run: `-verbose` wins over the environment
pub fn log_level(verbose: bool) -> String {
    if verbose {
        VERBOSE_LOG_LEVEL.to_string()
    } else {
        get_log_level()
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let level = log_level(verbose);
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_ok() {
        tracing::debug!(level = %level, "tracing initialized");
    }
}
