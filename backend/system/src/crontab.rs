//! Locating a user's live crontab.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::probe::{Probe, ProbeOutcome};

/// Where a user's crontab came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrontabSource {
    /// A spool file readable on disk.
    Path(PathBuf),
    /// Text printed by `crontab -l`.
    Fetched(String),
}

/// Spool locations checked before falling back to `crontab -l`, in order.
pub fn spool_candidates(user: &str) -> Vec<PathBuf> {
    vec![
        PathBuf::from(format!("/var/spool/cron/crontabs/{user}")),
        PathBuf::from(format!("/var/spool/cron/{user}")),
        PathBuf::from(format!("/tmp/crontab.{user}")),
    ]
}

fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates.iter().map(PathBuf::as_path).find(|p| p.exists())
}

pub fn find_user_crontab(user: &str, probe: &Probe) -> Option<CrontabSource> {
    let candidates = spool_candidates(user);
    if let Some(path) = first_existing(&candidates) {
        return Some(CrontabSource::Path(path.to_path_buf()));
    }
    fetch_crontab(user, probe).map(CrontabSource::Fetched)
}

/// Run `crontab -l -u <user>` with twice the probe timeout.
pub fn fetch_crontab(user: &str, probe: &Probe) -> Option<String> {
    let outcome = probe.run_for("crontab", &["-l", "-u", user], fetch_timeout(probe.timeout()));
    fetched_text(user, outcome)
}

fn fetch_timeout(probe_timeout: Duration) -> Duration {
    probe_timeout.saturating_mul(2)
}

fn fetched_text(user: &str, outcome: ProbeOutcome) -> Option<String> {
    match outcome {
        ProbeOutcome::Completed(out) if out.success() => Some(out.stdout),
        ProbeOutcome::Completed(out)
            if out.code == Some(1) && out.stderr.to_lowercase().contains("no crontab for") =>
        {
            info!(user, "no crontab found for user");
            None
        }
        ProbeOutcome::Completed(out) => {
            warn!(user, stderr = out.stderr.trim(), "error getting crontab");
            None
        }
        ProbeOutcome::TimedOut => {
            warn!(user, "timeout getting crontab");
            None
        }
        ProbeOutcome::NotFound => {
            warn!(user, "crontab command not found");
            None
        }
        ProbeOutcome::Failed(err) => {
            warn!(user, error = %err, "unexpected error getting crontab");
            None
        }
    }
}
