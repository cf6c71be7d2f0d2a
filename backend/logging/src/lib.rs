//! Logging setup for cronlint.
//!
//! Human-facing output goes to stderr so JSON and SARIF reports on stdout
//! stay machine-readable. An optional directory receives a daily NDJSON log.

pub mod logger;

pub use logger::{console_level, init_logger, LogOptions};
