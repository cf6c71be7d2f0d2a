//! File scanning: physical lines → logical lines → diagnostics.

use std::path::Path;

use cronlint_core::{
    clean_line, CronlintError, CrontabKind, Diagnostic, Finding, LogicalLine, UserLookup,
};
use tracing::{debug, warn};

use crate::entry::check_logical_line;

/// Result of scanning one crontab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Logical lines that were classified and checked.
    pub rows_checked: usize,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ScanOutcome {
    /// Distinct line numbers carrying at least one line-level error.
    pub fn rows_with_errors(&self) -> usize {
        let mut lines: Vec<usize> = self
            .errors
            .iter()
            .filter(|d| !d.finding.is_file_level())
            .map(|d| d.line_number)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        lines.len()
    }

    fn push(&mut self, diag: Diagnostic) {
        if diag.is_error() {
            self.errors.push(diag);
        } else {
            self.warnings.push(diag);
        }
    }
}

/// Join backslash continuations and drop blank, comment and stray lines.
///
/// Returns the logical lines together with the number of physical lines.
/// A line ending in `\` swallows the following lines that start with a
/// space or tab, up to and including the first one that does not itself end
/// in `\`. Continuations are joined with `\n`. Any other line starting with
/// a space or tab is stray and skipped.
pub fn logical_lines(text: &str) -> (Vec<LogicalLine>, usize) {
    let physical: Vec<&str> = text.lines().collect();
    let mut logical = Vec::new();
    let mut i = 0;

    while i < physical.len() {
        let first = physical[i];
        let line_number = i + 1;
        i += 1;

        if first.starts_with([' ', '\t']) {
            continue;
        }

        let joined = match first.strip_suffix('\\') {
            Some(head) => {
                let mut joined = head.to_string();
                while let Some(next) = physical.get(i).filter(|l| l.starts_with([' ', '\t'])) {
                    i += 1;
                    joined.push('\n');
                    match next.strip_suffix('\\') {
                        Some(cont) => joined.push_str(cont),
                        None => {
                            joined.push_str(next);
                            break;
                        }
                    }
                }
                joined
            }
            None => first.to_string(),
        };

        let trimmed = joined.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        logical.push(LogicalLine { text: joined, line_number, display: first.to_string() });
    }

    (logical, physical.len())
}

/// Scan crontab text already in memory.
///
/// Each diagnostic is handed to `sink` as soon as its line has been checked,
/// so callers can stream output in line order.
pub fn scan_source<F>(
    file: &str,
    text: &str,
    kind: CrontabKind,
    users: &dyn UserLookup,
    mut sink: F,
) -> ScanOutcome
where
    F: FnMut(&Diagnostic),
{
    let (lines, physical_count) = logical_lines(text);
    let mut outcome = ScanOutcome::default();

    for line in &lines {
        outcome.rows_checked += 1;
        let report = check_logical_line(line, kind, file, users);
        if report.is_clean() {
            debug!("{} (Line {}): {} # valid", file, line.line_number, clean_line(&line.display));
            continue;
        }
        for diag in report.errors.into_iter().chain(report.warnings) {
            sink(&diag);
            outcome.push(diag);
        }
    }

    if !text.is_empty() && !text.ends_with('\n') {
        let diag = Diagnostic::file_level(file, physical_count + 1, Finding::MissingTrailingNewline);
        sink(&diag);
        outcome.push(diag);
    }

    outcome
}

/// Read a crontab from disk.
pub fn read_crontab(path: &Path) -> Result<String, CronlintError> {
    std::fs::read_to_string(path).map_err(|source| CronlintError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Base name used in diagnostics.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Scan a crontab file. An unreadable file yields zero checked rows and a
/// single "Error reading file" diagnostic at Line 0.
pub fn scan_file<F>(path: &Path, kind: CrontabKind, users: &dyn UserLookup, mut sink: F) -> ScanOutcome
where
    F: FnMut(&Diagnostic),
{
    let file = display_name(path);
    match read_crontab(path) {
        Ok(text) => scan_source(&file, &text, kind, users, sink),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "crontab unreadable");
            let reason = match &e {
                CronlintError::Io { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            let diag = Diagnostic::file_level(&file, 0, Finding::UnreadableFile { reason });
            sink(&diag);
            let mut outcome = ScanOutcome::default();
            outcome.push(diag);
            outcome
        }
    }
}
