//! Cron daemon status via systemd.

use tracing::debug;

use crate::probe::{Probe, ProbeOutcome};

pub const CRON_UNIT: &str = "cron";

/// Ask systemd whether the cron unit is active. Returns warnings only.
pub fn check_daemon(probe: &Probe) -> Vec<String> {
    daemon_warnings(probe.run("systemctl", &["is-active", CRON_UNIT]))
}

fn daemon_warnings(outcome: ProbeOutcome) -> Vec<String> {
    match outcome {
        ProbeOutcome::Completed(out) if out.success() && out.stdout.trim() == "active" => {
            debug!(unit = CRON_UNIT, "cron daemon is active");
            Vec::new()
        }
        ProbeOutcome::Completed(out) => {
            debug!(unit = CRON_UNIT, code = ?out.code, state = out.stdout.trim(), "cron daemon inactive");
            vec!["Cron daemon is not running".to_string()]
        }
        ProbeOutcome::TimedOut => vec!["Could not check cron daemon status: timeout".to_string()],
        ProbeOutcome::NotFound => {
            vec!["Could not check cron daemon status: systemctl not found".to_string()]
        }
        ProbeOutcome::Failed(err) => vec![format!("Could not check cron daemon status: {err}")],
    }
}
