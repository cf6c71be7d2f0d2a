mod config;
mod output;
mod report;
mod targets;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use cronlint_checker::{check_filename, display_name, scan_file, scan_source, ScanOutcome};
use cronlint_core::{CrontabKind, Diagnostic, Finding, UserLookup};
use cronlint_logging::{init_logger, LogOptions};
use cronlint_system::{
    check_daemon, check_owner_and_permissions, find_user_crontab, Probe, SystemUsers,
    EXPECTED_MODE, ROOT_UID,
};

use config::Config;
use output::Palette;
use report::{FileReport, RunReport};
use targets::{Request, Source, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Sarif,
}

#[derive(Parser, Debug)]
#[command(name = "cronlint")]
#[command(about = "Check crontab files for syntax errors and risky entries")]
#[command(version)]
#[command(after_help = "\
Examples:
    cronlint                                  # check nothing but the cron daemon
    cronlint filename                         # check a crontab file
    cronlint username                         # check a user's live crontab
    cronlint file1 file2 username             # mix files and users
    cronlint -S file1 -U file2 -u username    # force crontab kinds
    cronlint filename -j | jq '.total_errors' # JSON report")]
struct Cli {
    /// Paths to crontab files or directories, or user names
    arguments: Vec<String>,

    /// System crontab file or directory (has a user column)
    #[arg(short = 'S', long = "system", value_name = "FILENAME")]
    system: Vec<PathBuf>,

    /// User crontab file
    #[arg(short = 'U', long = "user", value_name = "FILENAME")]
    user: Vec<PathBuf>,

    /// User whose live crontab is checked
    #[arg(short = 'u', long = "username", value_name = "USERNAME")]
    username: Vec<String>,

    /// Debug output, including valid lines
    #[arg(short, long)]
    debug: bool,

    /// Disable colored output
    #[arg(short = 'n', long)]
    no_colors: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Shortcut for --format json
    #[arg(short = 'j')]
    json: bool,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,

    /// Always exit with code 0
    #[arg(long)]
    exit_zero: bool,

    /// Also write an NDJSON log to this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn format(&self) -> Format {
        if self.json { Format::Json } else { self.format }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();
    let format = cli.format();
    let color = output::supports_color(cli.no_colors, config.no_color);

    init_logger(&LogOptions {
        debug: cli.debug,
        color,
        machine_output: format != Format::Text,
        log_dir: cli.log_dir.clone().or_else(|| config.log_dir.clone()),
    });

    match run(&cli, &config, Palette { color }) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli, config: &Config, palette: Palette) -> Result<u8> {
    let format = cli.format();
    let text = format == Format::Text;
    let on_linux = cfg!(target_os = "linux");

    let probe = Probe::new(config.probe_timeout).context("starting probe runtime")?;

    let request = Request {
        args: cli.arguments.clone(),
        system: cli.system.clone(),
        user: cli.user.clone(),
        usernames: cli.username.clone(),
    };
    let targets = targets::resolve(&request, |user| find_user_crontab(user, &probe));

    if on_linux {
        if !config.github_actions {
            for warning in check_daemon(&probe) {
                warn!("{warning}");
            }
        }
    } else {
        info!("Skipping system checks on non-Linux system");
    }

    if targets.is_empty() {
        warn!("No files to check.");
    }

    let users = SystemUsers::new(&probe);

    let mut run = RunReport::new();
    for target in &targets {
        let file = check_target(target, &users, on_linux);
        if text {
            match (file.counted, file.errors_count) {
                (false, _) => warn!("File {} does not exist", file.file),
                (true, 0) => info!(
                    "{}",
                    palette.success(&output::file_summary(&file.file, file.rows, 0, 0))
                ),
                (true, n) => error!(
                    "{}",
                    palette.failure(&output::file_summary(&file.file, file.rows, file.rows_errors, n))
                ),
            }
        }
        run.push(file);
    }

    match format {
        Format::Json => println!("{}", output::render_json(&run).context("rendering JSON report")?),
        Format::Sarif => println!("{}", output::render_sarif(&run).context("rendering SARIF report")?),
        Format::Text if run.total_errors == 0 => info!("{}", palette.success(&output::run_summary(&run))),
        Format::Text => error!("{}", palette.failure(&output::run_summary(&run))),
    }

    Ok(run.exit_code(cli.strict, cli.exit_zero))
}

/// Log one diagnostic as soon as it is produced.
fn emit(diag: &Diagnostic) {
    if diag.is_error() {
        error!("{diag}");
    } else {
        warn!("{diag}");
    }
}

fn check_target(target: &Target, users: &dyn UserLookup, on_linux: bool) -> FileReport {
    let is_system = target.kind == CrontabKind::System;
    let label = target.label();

    let path = match &target.source {
        Source::Fetched { user, text } => {
            let name = format!("crontab.{user}");
            let outcome = scan_source(&name, text, target.kind, users, emit);
            return FileReport::from_outcome(label, is_system, &outcome);
        }
        Source::File(path) => path,
    };

    if !path.exists() {
        return FileReport::missing(label, is_system);
    }

    let name = display_name(path);
    if target.check_name && is_system {
        let reasons = check_filename(&name);
        if !reasons.is_empty() {
            let diag = Diagnostic::file_level(&name, 0, Finding::InvalidFilename { reasons });
            emit(&diag);
            let outcome = ScanOutcome { rows_checked: 0, errors: vec![diag], warnings: Vec::new() };
            return FileReport::from_outcome(label, is_system, &outcome);
        }
    }

    let hygiene: Vec<Diagnostic> = if on_linux && is_system {
        check_owner_and_permissions(path, EXPECTED_MODE, ROOT_UID)
            .into_iter()
            .map(|problem| Diagnostic::file_level(&name, 0, Finding::FileHygiene(problem)))
            .inspect(emit)
            .collect()
    } else {
        Vec::new()
    };

    let mut outcome = scan_file(path, target.kind, users, emit);
    outcome.errors.extend(hygiene);
    FileReport::from_outcome(label, is_system, &outcome)
}
