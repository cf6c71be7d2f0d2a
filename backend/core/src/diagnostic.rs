//! Findings (what is wrong) and diagnostics (where, rendered for humans).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::CrontabKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single defect found on a crontab line or file.
///
/// The `Display` text is the stable, greppable message that appears after the
/// `#` of a rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Finding {
    #[error("empty value in {field} list: '{value}'")]
    EmptyListValue { field: &'static str, value: String },

    #[error("duplicate value '{part}' in {field} list: '{value}'")]
    DuplicateValue { field: &'static str, part: String, value: String },

    #[error("invalid step value in {field}: '{value}'")]
    InvalidStep { field: &'static str, value: String },

    #[error("step value must be positive in {field}: '{value}'")]
    NonPositiveStep { field: &'static str, value: String },

    #[error("step value {step} exceeds maximum {max} for {field}: '{value}'")]
    StepExceedsMax { field: &'static str, step: String, max: u64, value: String },

    #[error("invalid range {start}-{end} in {field}: start > end")]
    InvalidRange { field: &'static str, start: String, end: String },

    #[error("range start {start} out of bounds ({min}-{max}) for {field}: '{value}'")]
    RangeStartOutOfBounds { field: &'static str, start: String, min: u64, max: u64, value: String },

    #[error("range end {end} out of bounds ({min}-{max}) for {field}: '{value}'")]
    RangeEndOutOfBounds { field: &'static str, end: String, min: u64, max: u64, value: String },

    #[error("value {number} out of bounds ({min}-{max}) for {field}: '{value}'")]
    ValueOutOfBounds { field: &'static str, number: String, min: u64, max: u64, value: String },

    #[error("invalid {label} format: '{value}'")]
    InvalidFormat { label: &'static str, value: String },

    #[error("invalid special keyword '{keyword}'")]
    InvalidSpecialKeyword { keyword: String },

    #[error("insufficient fields for special keyword (minimum {required} required for {kind} crontab, found {found})")]
    InsufficientSpecialFields { kind: CrontabKind, required: usize, found: usize },

    #[error("insufficient fields (minimum {required} required for {kind} crontab, found {found})")]
    InsufficientFields { kind: CrontabKind, required: usize, found: usize },

    #[error("too many fields (maximum {max} allowed for system crontab, found {found})")]
    TooManyFields { max: usize, found: usize },

    #[error("invalid user format: '{user}'")]
    InvalidUser { user: String },

    #[error("user does not exist: '{user}'")]
    UnknownUser { user: String },

    #[error("missing command")]
    MissingCommand,

    #[error("dangerous command: '{pattern}'")]
    DangerousCommand { pattern: &'static str },

    #[error("File should end with newline")]
    MissingTrailingNewline,

    #[error("Error reading file: {reason}")]
    UnreadableFile { reason: String },

    #[error("invalid cron filename: {}", .reasons.join("; "))]
    InvalidFilename { reasons: Vec<String> },

    #[error("{0}")]
    FileHygiene(String),
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::UnknownUser { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// File-level findings have no real line and are left out of the
    /// "lines with errors" tally.
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            Finding::MissingTrailingNewline
                | Finding::UnreadableFile { .. }
                | Finding::InvalidFilename { .. }
                | Finding::FileHygiene(_)
        )
    }
}

/// A finding anchored to a file and line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Base name of the checked file.
    pub file: String,
    pub line_number: usize,
    /// Normalized line content; `None` for file-level diagnostics.
    pub content: Option<String>,
    pub finding: Finding,
}

impl Diagnostic {
    pub fn new(file: &str, line_number: usize, content: Option<&str>, finding: Finding) -> Self {
        Self {
            severity: finding.severity(),
            file: file.to_string(),
            line_number,
            content: content.map(clean_line),
            finding,
        }
    }

    /// Diagnostic with no line content (trailing newline, filename, permissions).
    pub fn file_level(file: &str, line_number: usize, finding: Finding) -> Self {
        Self::new(file, line_number, None, finding)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn message(&self) -> String {
        self.finding.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Some(content) => write!(
                f,
                "{} (Line {}): {} # {}",
                self.file, self.line_number, content, self.finding
            ),
            None => write!(f, "{} (Line {}): {}", self.file, self.line_number, self.finding),
        }
    }
}

/// Replace tabs with spaces and collapse runs of spaces into one.
pub fn clean_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_space = false;
    for c in line.chars() {
        let c = if c == '\t' { ' ' } else { c };
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }
    out
}
