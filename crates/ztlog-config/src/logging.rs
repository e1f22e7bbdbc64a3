//! Logging initialization for the admin client.
//!
//! Thin wrapper over the `observability` crate: terminal commands log to
//! stderr, and optionally to the JSONL file under `~/.ztlog/logs`.

use observability::{LogConfig, LogTarget};

/// Initialize the logging system.
///
/// * `level` - Default log level (trace, debug, info, warn, error); `RUST_LOG` wins.
/// * `log_to_file` - Also append JSONL entries to `~/.ztlog/logs/admin.jsonl`.
///
/// ```ignore
/// init_logging("warn", false);
/// tracing::info!("client started");
/// ```
pub fn init_logging(level: &str, log_to_file: bool) {
    observability::init_with_config(log_config(level, log_to_file));
}

fn log_config(level: &str, log_to_file: bool) -> LogConfig {
    LogConfig {
        service_name: "ztlog-admin".into(),
        default_level: level.into(),
        target: if log_to_file {
            LogTarget::Both
        } else {
            LogTarget::Stderr
        },
        ..Default::default()
    }
}
