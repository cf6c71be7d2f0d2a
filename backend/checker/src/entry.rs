//! Entry parsing and validation.
//!
//! A classified line is first parsed into an [`Entry`] according to the
//! crontab kind. Parsing fails with a single terminal finding when the
//! field layout is wrong; a parsed entry is then checked column by column
//! and every finding is kept.

use cronlint_core::{
    CrontabKind, Diagnostic, Finding, LogicalLine, SpecialKeyword, UserLookup, SYSTEM_MAX_FIELDS,
};

use crate::classify::{classify, Line};
use crate::command::check_command;
use crate::grammar::validate_schedule;
use crate::user::check_user;

/// `m h dom mon dow [user] command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry<'a> {
    pub schedule: [&'a str; 5],
    /// Present exactly for system crontabs.
    pub user: Option<&'a str>,
    pub command: String,
}

/// `@keyword [user] command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialEntry<'a> {
    pub keyword: SpecialKeyword,
    pub user: Option<&'a str>,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<'a> {
    Time(TimeEntry<'a>),
    Special(SpecialEntry<'a>),
}

impl<'a> Entry<'a> {
    pub fn user(&self) -> Option<&'a str> {
        match self {
            Entry::Time(e) => e.user,
            Entry::Special(e) => e.user,
        }
    }

    pub fn command(&self) -> &str {
        match self {
            Entry::Time(e) => &e.command,
            Entry::Special(e) => &e.command,
        }
    }
}

/// Parse an `@keyword` line. `fields` excludes the keyword itself.
pub fn parse_special<'a>(
    keyword: &str,
    fields: &[&'a str],
    kind: CrontabKind,
) -> Result<Entry<'a>, Finding> {
    let keyword = SpecialKeyword::parse(keyword)
        .ok_or_else(|| Finding::InvalidSpecialKeyword { keyword: keyword.to_string() })?;

    let found = fields.len() + 1;
    let required = kind.min_special_fields();
    if found < required {
        return Err(Finding::InsufficientSpecialFields { kind, required, found });
    }

    let (user, rest) = match kind {
        CrontabKind::System => (Some(fields[0]), &fields[1..]),
        CrontabKind::User => (None, fields),
    };
    Ok(Entry::Special(SpecialEntry { keyword, user, command: rest.join(" ") }))
}

/// Parse a five-field time line from its whitespace-separated tokens.
pub fn parse_time<'a>(tokens: &[&'a str], kind: CrontabKind) -> Result<Entry<'a>, Finding> {
    let found = tokens.len();
    let required = kind.min_time_fields();
    if found < required {
        return Err(Finding::InsufficientFields { kind, required, found });
    }

    let schedule = [tokens[0], tokens[1], tokens[2], tokens[3], tokens[4]];
    let entry = match kind {
        CrontabKind::System => {
            let command = tokens[6..].join(" ");
            // A multi-word command legitimately yields more than seven tokens.
            if found > SYSTEM_MAX_FIELDS && !command.contains(' ') {
                return Err(Finding::TooManyFields { max: SYSTEM_MAX_FIELDS, found });
            }
            TimeEntry { schedule, user: Some(tokens[5]), command }
        }
        CrontabKind::User => TimeEntry { schedule, user: None, command: tokens[5..].join(" ") },
    };
    Ok(Entry::Time(entry))
}

/// Run the non-terminal checks on a parsed entry: user, command, then the
/// time fields in column order.
pub fn check_entry(entry: &Entry<'_>, kind: CrontabKind, users: &dyn UserLookup) -> Vec<Finding> {
    let mut findings = Vec::new();
    if let Some(user) = entry.user() {
        findings.extend(check_user(user, users));
    }
    findings.extend(check_command(entry.command()));
    if let Entry::Time(time) = entry {
        findings.extend(validate_schedule(&time.schedule, kind));
    }
    findings
}

/// Classify, parse and check one logical line. Skipped lines and
/// environment assignments produce nothing.
pub fn check_line(text: &str, kind: CrontabKind, users: &dyn UserLookup) -> Vec<Finding> {
    let parsed = match classify(text) {
        Line::Skip | Line::EnvAssignment => return Vec::new(),
        Line::Special { keyword, fields } => parse_special(keyword, &fields, kind),
        Line::Time { tokens } => parse_time(&tokens, kind),
    };
    match parsed {
        Ok(entry) => check_entry(&entry, kind, users),
        Err(terminal) => vec![terminal],
    }
}

/// Diagnostics of one logical line, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl LineReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Check a logical line and anchor its findings to `file` and the line's
/// first physical line number.
pub fn check_logical_line(
    line: &LogicalLine,
    kind: CrontabKind,
    file: &str,
    users: &dyn UserLookup,
) -> LineReport {
    let mut report = LineReport::default();
    for finding in check_line(&line.text, kind, users) {
        let diag = Diagnostic::new(file, line.line_number, Some(&line.display), finding);
        if diag.is_error() {
            report.errors.push(diag);
        } else {
            report.warnings.push(diag);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cronlint_core::AssumeUsersExist;

    fn errors(text: &str, kind: CrontabKind) -> Vec<String> {
        check_line(text, kind, &AssumeUsersExist).iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn plain_user_entry_is_valid() {
        assert!(errors("0 2 * * * /usr/bin/backup.sh", CrontabKind::User).is_empty());
    }

    #[test]
    fn out_of_bounds_minute() {
        let found = errors("60 2 * * * /usr/bin/backup.sh", CrontabKind::User);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("out of bounds"));
        assert!(found[0].contains("60"));
    }

    #[test]
    fn system_entry_without_command() {
        assert_eq!(
            errors("0 2 * * * root", CrontabKind::System),
            vec!["insufficient fields (minimum 7 required for system crontab, found 6)"]
        );
    }

    #[test]
    fn system_reboot_entry_is_valid() {
        let findings = check_line("@reboot root /usr/bin/x.sh", CrontabKind::System, &AssumeUsersExist);
        assert!(findings.is_empty());
    }

    #[test]
    fn minute_list_is_valid() {
        assert!(errors("0,15,30,45 * * * * /bin/true", CrontabKind::User).is_empty());
    }

    #[test]
    fn user_entry_needs_six_fields() {
        assert_eq!(
            errors("0 2 * * *", CrontabKind::User),
            vec!["insufficient fields (minimum 6 required for user crontab, found 5)"]
        );
    }

    #[test]
    fn unknown_keyword_is_terminal() {
        assert_eq!(
            errors("@sometimes", CrontabKind::User),
            vec!["invalid special keyword '@sometimes'"]
        );
        assert_eq!(
            errors("@Daily rm -rf /", CrontabKind::User),
            vec!["invalid special keyword '@Daily'"]
        );
    }

    #[test]
    fn special_field_counts() {
        assert_eq!(
            errors("@daily", CrontabKind::User),
            vec!["insufficient fields for special keyword (minimum 2 required for user crontab, found 1)"]
        );
        assert_eq!(
            errors("@daily root", CrontabKind::System),
            vec!["insufficient fields for special keyword (minimum 3 required for system crontab, found 2)"]
        );
        assert!(errors("@daily /bin/x", CrontabKind::User).is_empty());
    }

    #[test]
    fn multi_word_system_command_is_accepted() {
        assert!(errors("0 2 * * * root /usr/bin/backup.sh --full now", CrontabKind::System).is_empty());
        // the word after the user is part of the command, not an extra column
        assert!(errors("0 2 * * * root extra /usr/bin/backup.sh", CrontabKind::System).is_empty());
    }

    #[test]
    fn structural_failure_stops_other_checks() {
        assert_eq!(errors("99 99 * * *", CrontabKind::User).len(), 1);
    }

    #[test]
    fn findings_are_ordered_user_command_fields() {
        let findings = errors("60 24 * * * bad@user rm -rf /", CrontabKind::System);
        assert_eq!(
            findings,
            vec![
                "invalid user format: 'bad@user'",
                "dangerous command: 'rm -rf /'",
                "value 60 out of bounds (0-59) for minutes: '60'",
                "value 24 out of bounds (0-23) for hours: '24'",
            ]
        );
    }

    #[test]
    fn user_column_only_for_system() {
        let entry = parse_time(&["0", "2", "*", "*", "*", "root", "/bin/x"], CrontabKind::System);
        assert_eq!(entry.unwrap().user(), Some("root"));
        let entry = parse_time(&["0", "2", "*", "*", "*", "root", "/bin/x"], CrontabKind::User);
        let entry = entry.unwrap();
        assert_eq!(entry.user(), None);
        assert_eq!(entry.command(), "root /bin/x");
    }

    #[test]
    fn env_and_comments_produce_nothing() {
        assert!(errors("SHELL=/bin/sh", CrontabKind::System).is_empty());
        assert!(errors("# 99 * * * *", CrontabKind::User).is_empty());
    }

    #[test]
    fn unknown_user_becomes_warning_diagnostic() {
        let line = LogicalLine {
            text: "0 2 * * * ghost /bin/x".into(),
            line_number: 4,
            display: "0  2 * * *\tghost /bin/x".into(),
        };
        let only_root = |name: &str| name == "root";
        let report = check_logical_line(&line, CrontabKind::System, "crontab", &only_root);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].to_string(),
            "crontab (Line 4): 0 2 * * * ghost /bin/x # user does not exist: 'ghost'"
        );
    }

    #[test]
    fn dash_minute_in_system_crontab() {
        assert!(errors("-0 2 * * * root /bin/x", CrontabKind::System).is_empty());
        assert_eq!(
            errors("-0 2 * * * /bin/x", CrontabKind::User),
            vec!["invalid minute format: '-0'"]
        );
    }
}
