//! Bounded subprocess runner.
//!
//! Every host probe shells out to a short-lived tool (`id`, `systemctl`,
//! `crontab`). The runner owns a current-thread tokio runtime so callers
//! stay synchronous while each child is still bounded by a timeout and
//! killed when it overruns.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use cronlint_core::{CronlintError, Result};
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Captured output of a child that exited on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutput {
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProbeOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// What happened when a probe ran. Callers decide how to fail open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Completed(ProbeOutput),
    TimedOut,
    NotFound,
    Failed(String),
}

pub struct Probe {
    runtime: tokio::runtime::Runtime,
    timeout: Duration,
}

impl Probe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CronlintError::Runtime(e.to_string()))?;
        Ok(Self { runtime, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `program` with the default timeout.
    pub fn run(&self, program: &str, args: &[&str]) -> ProbeOutcome {
        self.run_for(program, args, self.timeout)
    }

    pub fn run_for(&self, program: &str, args: &[&str], limit: Duration) -> ProbeOutcome {
        match self.output(program, args, limit) {
            Ok(out) => ProbeOutcome::Completed(out),
            Err(CronlintError::ProbeTimeout { .. }) => ProbeOutcome::TimedOut,
            Err(CronlintError::ProbeSpawn { source, .. }) if source.kind() == ErrorKind::NotFound => {
                ProbeOutcome::NotFound
            }
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }

    /// Run `program` and collect its output, or fail with a typed error.
    pub fn output(&self, program: &str, args: &[&str], limit: Duration) -> Result<ProbeOutput> {
        debug!(program, ?args, timeout_secs = limit.as_secs(), "running probe");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = self
            .runtime
            .block_on(async { tokio::time::timeout(limit, cmd.output()).await });

        match result {
            Err(_) => Err(CronlintError::ProbeTimeout {
                program: program.to_string(),
                secs: limit.as_secs(),
            }),
            Ok(Err(source)) => Err(CronlintError::ProbeSpawn {
                program: program.to_string(),
                source,
            }),
            Ok(Ok(output)) => Ok(ProbeOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }
}
