//! Logging initialization.
//!
//! Thin wrapper over the observability crate: JSONL events go to
//! `<base>/logs/market.jsonl`, and stderr output is opt-in because the CLI
//! prints its own results there.

use crate::Paths;
use observability::LogConfig;

/// Initialize logging for the `market` CLI.
///
/// * `level` - Default log level (trace, debug, info, warn, error); `RUST_LOG`
///   takes precedence.
pub fn init_logging(level: &str, paths: &Paths) {
    init_logging_for_service("market-cli", level, paths, false);
}

/// Initialize logging with a custom service name.
pub fn init_logging_for_service(service_name: &str, level: &str, paths: &Paths, also_stderr: bool) {
    observability::init_with_config(LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).to_string().to_lowercase(),
        log_path: Some(paths.log_file()),
        also_stderr,
    });
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
