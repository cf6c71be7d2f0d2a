//! Per-file and per-run results, serialized as the JSON report.

use cronlint_checker::ScanOutcome;
use cronlint_core::Diagnostic;
use serde::Serialize;

/// An error with the structured line number SARIF needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub line: usize,
    pub message: String,
}

impl From<&Diagnostic> for Located {
    fn from(diag: &Diagnostic) -> Self {
        Self { line: diag.line_number, message: diag.message() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub is_system_crontab: bool,
    pub rows: usize,
    pub rows_errors: usize,
    pub errors_count: usize,
    pub warnings_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub success: bool,
    #[serde(skip)]
    pub located: Vec<Located>,
    /// Missing files are listed but left out of the run totals.
    #[serde(skip)]
    pub counted: bool,
}

impl FileReport {
    pub fn from_outcome(file: String, is_system_crontab: bool, outcome: &ScanOutcome) -> Self {
        Self {
            file,
            is_system_crontab,
            rows: outcome.rows_checked,
            rows_errors: outcome.rows_with_errors(),
            errors_count: outcome.errors.len(),
            warnings_count: outcome.warnings.len(),
            errors: outcome.errors.iter().map(ToString::to_string).collect(),
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
            success: outcome.errors.is_empty(),
            located: outcome.errors.iter().map(Located::from).collect(),
            counted: true,
        }
    }

    pub fn missing(file: String, is_system_crontab: bool) -> Self {
        let message = format!("File {file} does not exist");
        Self {
            file,
            is_system_crontab,
            rows: 0,
            rows_errors: 0,
            errors_count: 1,
            warnings_count: 0,
            errors: vec![message.clone()],
            warnings: Vec::new(),
            success: false,
            located: vec![Located { line: 0, message }],
            counted: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub total_files: usize,
    pub total_rows: usize,
    pub total_rows_errors: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Distinct (file, line) pairs with errors across the run.
    pub rows_errors: usize,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self { success: true, ..Self::default() }
    }

    pub fn push(&mut self, file: FileReport) {
        self.total_files += 1;
        if file.counted {
            self.total_rows += file.rows;
            self.total_rows_errors += file.rows_errors;
            self.total_errors += file.errors_count;
            self.total_warnings += file.warnings_count;
            self.rows_errors += file.rows_errors;
        }
        self.success = self.total_errors == 0;
        self.files.push(file);
    }

    /// 0 when the run is clean or `exit_zero` is set, else 1. `strict`
    /// counts warnings as failures.
    pub fn exit_code(&self, strict: bool, exit_zero: bool) -> u8 {
        if exit_zero {
            return 0;
        }
        let issues = self.total_errors + if strict { self.total_warnings } else { 0 };
        if issues == 0 { 0 } else { 1 }
    }
}
