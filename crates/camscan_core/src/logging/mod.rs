//! Logging infrastructure for the scanning toolkit.
//!
//! Application-wide logging goes through the `tracing` ecosystem:
//! stderr output filtered by `RUST_LOG` (falling back to the configured
//! level), with an optional daily-rolling file in the logs directory.

mod types;

pub use types::LogLevel;

use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// - Respects the RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.filter_str()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Initialize tracing with an additional daily-rolling log file.
///
/// The file layer logs everything at the default level or above,
/// regardless of RUST_LOG, so a quiet console run still leaves a
/// session record in `logs_dir`.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.filter_str()));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "camscan.log");

    // Filters are per-layer here: a quiet RUST_LOG must not starve the
    // file layer.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::new(default_level.filter_str())),
        )
        .init();
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_str_matches_level() {
        assert_eq!(LogLevel::Debug.filter_str(), "debug");
        assert_eq!(LogLevel::Info.filter_str(), "info");
    }
}
