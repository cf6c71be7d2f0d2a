//! Report rendering: colored text notes, JSON and SARIF 2.1.0.

use serde_json::{json, Value};

use crate::report::RunReport;

pub const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
pub const SARIF_VERSION: &str = "2.1.0";
pub const RULE_ID: &str = "crontab-syntax-error";

// ---------------------------------------------------------------------------
// ANSI helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Whether the terminal should get color: not disabled by flag or
/// `NO_COLOR`, and not a dumb terminal.
pub fn supports_color(no_colors_flag: bool, no_color_env: bool) -> bool {
    !no_colors_flag
        && !no_color_env
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn success(&self, msg: &str) -> String {
        if self.color {
            format!("{GREEN}{BOLD}✓{RESET} {msg}")
        } else {
            format!("OK: {msg}")
        }
    }

    pub fn failure(&self, msg: &str) -> String {
        if self.color {
            format!("{RED}{BOLD}✗{RESET} {msg}")
        } else {
            format!("FAIL: {msg}")
        }
    }
}

// ---------------------------------------------------------------------------
// Text summaries
// ---------------------------------------------------------------------------

pub fn file_summary(file: &str, rows: usize, rows_errors: usize, errors: usize) -> String {
    if errors > 0 {
        format!("{file}: {rows_errors}/{rows} lines with errors. Total {errors} errors.")
    } else {
        format!("{file}: 0/{rows} lines with errors. No errors.")
    }
}

pub fn run_summary(report: &RunReport) -> String {
    if report.total_errors == 0 {
        "All checks passed successfully!".to_string()
    } else {
        format!(
            "Total: {} lines with errors found in {} checked lines",
            report.rows_errors, report.total_rows
        )
    }
}

// ---------------------------------------------------------------------------
// Machine formats
// ---------------------------------------------------------------------------

pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn sarif(report: &RunReport) -> Value {
    let results: Vec<Value> = report
        .files
        .iter()
        .flat_map(|file| {
            file.located.iter().map(move |err| {
                json!({
                    "ruleId": RULE_ID,
                    "level": "error",
                    "message": { "text": err.message },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": { "uri": file.file },
                            "region": { "startLine": err.line.max(1), "startColumn": 1 },
                        }
                    }],
                })
            })
        })
        .collect();

    let mut driver = json!({
        "name": "cronlint",
        "version": env!("CARGO_PKG_VERSION"),
    });
    let repository = env!("CARGO_PKG_REPOSITORY");
    if !repository.is_empty() {
        driver["informationUri"] = json!(repository);
    }

    json!({
        "$schema": SARIF_SCHEMA,
        "version": SARIF_VERSION,
        "runs": [{
            "tool": { "driver": driver },
            "results": results,
        }],
    })
}

pub fn render_sarif(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sarif(report))
}
