//! Command column checks: presence and a denylist of destructive commands.

use cronlint_core::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

/// Destructive command patterns and the label reported for each.
static DANGEROUS_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\brm\s+-rf\s+/", "rm -rf /"),
        (r"(?i)\brm\s+-fr\s+/", "rm -rf /"),
        (r"(?i)\brm\s+-r\s+-f\s+/", "rm -rf /"),
        (r"(?i)\brm\s+-f\s+-r\s+/", "rm -rf /"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).unwrap(), label))
    .collect()
});

/// Check the command column. At most one dangerous-command finding is
/// reported per command.
pub fn check_command(command: &str) -> Vec<Finding> {
    if command.is_empty() {
        return vec![Finding::MissingCommand];
    }
    DANGEROUS_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(command))
        .map(|(_, label)| Finding::DangerousCommand { pattern: *label })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_missing() {
        assert_eq!(check_command(""), vec![Finding::MissingCommand]);
        assert_eq!(check_command("").len(), 1);
    }

    #[test]
    fn ordinary_commands_pass() {
        for cmd in [
            "/usr/bin/backup.sh",
            "rm -rf tmp/cache",
            "rm -f /var/log/old.log",
            "echo 'rm' -rf",
            "firmware -rf /x",
        ] {
            assert!(check_command(cmd).is_empty(), "{cmd}");
        }
    }

    #[test]
    fn rm_rf_root_is_flagged_once() {
        for cmd in [
            "rm -rf /",
            "RM -RF /",
            "cd /tmp && rm  -rf / ; echo done",
            "rm -fr /",
            "rm -r -f /",
            "rm -f -r /",
            "rm -rf /tmp/*",
        ] {
            let findings = check_command(cmd);
            assert_eq!(findings.len(), 1, "{cmd}");
            assert_eq!(findings[0].to_string(), "dangerous command: 'rm -rf /'");
        }
    }
}
