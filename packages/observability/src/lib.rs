//! # Observability
//!
//! Logging setup shared by every binary in the ZTLog admin workspace.
//!
//! Crates never configure subscribers themselves. They use the `tracing`
//! macros, and the binary calls [`init_with_config`] exactly once at startup.
//!
//! Two sinks are available and may be combined:
//!
//! - a JSONL file (one object per line) at `~/.ztlog/logs/admin.jsonl` by
//!   default, suitable for `tail -f ... | jq`
//! - a compact human-readable stderr stream
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "ztlog-admin".into(),
//!     default_level: "debug".into(),
//!     also_stderr: true,
//!     ..Default::default()
//! });
//! tracing::info!("ready");
//! ```

mod file_sink;
mod json_layer;

use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use file_sink::{default_log_path, FileLogWriter};
pub use json_layer::{JsonLayer, LogEntry};

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// JSONL file only.
    File,
    /// Compact stderr only.
    #[default]
    Stderr,
    /// Both sinks.
    Both,
}

impl LogTarget {
    fn wants_file(self) -> bool {
        matches!(self, LogTarget::File | LogTarget::Both)
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, written into every JSONL entry.
    pub service_name: String,

    /// Default level filter (e.g. "debug", "info", "warn").
    /// `RUST_LOG` takes precedence when set.
    pub default_level: String,

    /// Sinks to install.
    pub target: LogTarget,

    /// Custom JSONL path. Defaults to `~/.ztlog/logs/admin.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Kept for call sites that only toggle stderr; ORed into `target`.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            target: LogTarget::Stderr,
            log_path: None,
            also_stderr: false,
        }
    }
}

impl LogConfig {
    /// Resolve the effective sink selection.
    pub fn effective_target(&self) -> LogTarget {
        match (self.target, self.also_stderr) {
            (LogTarget::File, true) => LogTarget::Both,
            (target, _) => target,
        }
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging with only a service name.
pub fn init(service_name: &str) {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    });
}

/// Initialize logging with custom configuration.
///
/// If the JSONL file cannot be opened the file sink is skipped and a
/// warning is written to stderr; logging never aborts the process.
/// Calling this twice is a no-op for the second call.
pub fn init_with_config(config: LogConfig) {
    let target = config.effective_target();

    let file_layer = if target.wants_file() {
        let path = config.log_path.clone().unwrap_or_else(default_log_path);
        match FileLogWriter::new(&path) {
            Ok(writer) => Some(
                JsonLayer::new(config.service_name.clone(), writer)
                    .with_filter(env_filter(&config.default_level)),
            ),
            Err(e) => {
                eprintln!("observability: cannot open {}: {}", path.display(), e);
                None
            }
        }
    } else {
        None
    };

    let stderr_layer = if matches!(target, LogTarget::Stderr | LogTarget::Both) {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .compact()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(&config.default_level)),
        )
    } else {
        None
    };

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.service_name, "unknown");
        assert_eq!(config.default_level, "info");
        assert!(config.log_path.is_none());
        assert!(!config.also_stderr);
        assert_eq!(config.target, LogTarget::Stderr);
    }

    #[test]
    fn test_also_stderr_upgrades_file_target() {
        let config = LogConfig {
            target: LogTarget::File,
            also_stderr: true,
            ..Default::default()
        };
        assert_eq!(config.effective_target(), LogTarget::Both);

        let config = LogConfig {
            target: LogTarget::File,
            ..Default::default()
        };
        assert_eq!(config.effective_target(), LogTarget::File);
    }
}
