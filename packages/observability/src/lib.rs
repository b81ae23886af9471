//! # Observability
//!
//! Tracing setup shared by the marketplace client crates.
//!
//! Binaries call [`init_with_config`] once at startup and use the standard
//! `tracing` macros everywhere else. Library crates never install a
//! subscriber themselves.
//!
//! When a log path is available, every event is written as one JSON object
//! per line to that file (`~/.marketplace/logs/market.jsonl` by default):
//!
//! - `tail -f ~/.marketplace/logs/market.jsonl | jq` for pretty JSON
//! - `lnav ~/.marketplace/logs/market.jsonl` for interactive exploration
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "market-cli".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     });
//!     tracing::info!("ready");
//! }
//! ```

mod json_layer;
mod writer;

pub use json_layer::{JsonLayer, LogEntry};
pub use writer::{default_log_path, FileLogWriter, WriterFactory};

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "market-cli").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.marketplace/logs/market.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr for immediate feedback.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Initialize the observability layer with custom configuration.
///
/// Falls back to a plain stderr subscriber when the log file cannot be
/// opened (no home directory, read-only filesystem). Calling this twice is
/// harmless; the second installation is ignored.
pub fn init_with_config(config: LogConfig) {
    let log_path = config.log_path.clone().or_else(default_log_path);

    let file_writer = log_path
        .as_ref()
        .map(|path| (path, FileLogWriter::new(path)));

    match file_writer {
        Some((path, Ok(writer))) => {
            let json_layer = JsonLayer::new(config.service_name.clone(), WriterFactory::new(writer));

            let stderr_layer = if config.also_stderr {
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_file(false)
                        .with_line_number(false)
                        .compact()
                        .with_writer(io::stderr)
                        .with_filter(env_filter(&config.default_level)),
                )
            } else {
                None
            };

            let installed = tracing_subscriber::registry()
                .with(json_layer.with_filter(env_filter(&config.default_level)))
                .with(stderr_layer)
                .try_init();

            if installed.is_ok() {
                tracing::debug!(log_path = %path.display(), "observability initialized");
            }
        }
        Some((path, Err(e))) => {
            init_stderr_only(&config);
            tracing::warn!(log_path = %path.display(), error = %e, "log file unavailable, using stderr");
        }
        None => init_stderr_only(&config),
    }
}

fn init_stderr_only(config: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.default_level))
        .with_target(true)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;
