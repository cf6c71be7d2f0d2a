use std::path::PathBuf;
use std::time::Duration;

/// Environment-driven settings. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `NO_COLOR` is set (any value).
    pub no_color: bool,
    /// Directory for the NDJSON log file.
    pub log_dir: Option<PathBuf>,
    /// Bound for each host probe (`id`, `systemctl`).
    pub probe_timeout: Duration,
    /// Running under GitHub Actions; the daemon probe is skipped there.
    pub github_actions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_color: false,
            log_dir: None,
            probe_timeout: Duration::from_secs(5),
            github_actions: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            no_color: var("NO_COLOR").is_some(),
            log_dir: var("CRONLINT_LOG_DIR").filter(|d| !d.is_empty()).map(PathBuf::from),
            probe_timeout: var("CRONLINT_PROBE_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.probe_timeout),
            github_actions: var("GITHUB_ACTIONS").as_deref() == Some("true"),
        }
    }
}
