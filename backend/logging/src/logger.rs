//! Structured logger
//!
//! Console output through `tracing` with environment-based level control and
//! an optional rolling NDJSON file.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Show per-line "valid" messages and probe details.
    pub debug: bool,
    /// ANSI colors on the console.
    pub color: bool,
    /// A JSON or SARIF report owns stdout; keep the console to warnings.
    pub machine_output: bool,
    /// Directory for `cronlint.log.YYYY-MM-DD` files.
    pub log_dir: Option<PathBuf>,
}

/// Default filter directive when `RUST_LOG` is unset.
pub fn console_level(opts: &LogOptions) -> &'static str {
    if opts.debug {
        "debug"
    } else if opts.machine_output {
        "warn"
    } else {
        "info"
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logger(opts: &LogOptions) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level(opts)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(opts.color);

    // NDJSON file, rotated daily
    let file_layer = opts.log_dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "cronlint.log");
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_flags() {
        let mut opts = LogOptions::default();
        assert_eq!(console_level(&opts), "info");
        opts.machine_output = true;
        assert_eq!(console_level(&opts), "warn");
        opts.debug = true;
        assert_eq!(console_level(&opts), "debug");
    }

    #[test]
    fn init_with_file_log_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let opts = LogOptions { log_dir: Some(dir.path().to_path_buf()), ..LogOptions::default() };
        init_logger(&opts);
        init_logger(&opts);
        tracing::info!("logger initialized");
    }
}
