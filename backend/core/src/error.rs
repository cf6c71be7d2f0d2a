use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at collaborator boundaries (filesystem, subprocesses).
///
/// Content problems in a crontab are never errors; they are `Finding`s.
#[derive(Debug, Error)]
pub enum CronlintError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {secs}s")]
    ProbeTimeout { program: String, secs: u64 },

    #[error("failed to spawn {program}: {source}")]
    ProbeSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("probe runtime unavailable: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, CronlintError>;
