//! Turning command-line arguments into the list of crontabs to check.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cronlint_checker::{check_filename, is_valid_username};
use cronlint_core::CrontabKind;
use cronlint_system::CrontabSource;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    /// Text printed by `crontab -l` for this user.
    Fetched { user: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub source: Source,
    pub kind: CrontabKind,
    /// The file name was chosen by the caller and must follow run-parts rules.
    pub check_name: bool,
}

impl Target {
    fn file(path: PathBuf, kind: CrontabKind, check_name: bool) -> Self {
        Self { source: Source::File(path), kind, check_name }
    }

    /// Name shown in reports: the path, or `crontab.<user>` for fetched text.
    pub fn label(&self) -> String {
        match &self.source {
            Source::File(path) => path.display().to_string(),
            Source::Fetched { user, .. } => format!("crontab.{user}"),
        }
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Positional arguments: files, directories or user names.
    pub args: Vec<String>,
    pub system: Vec<PathBuf>,
    pub user: Vec<PathBuf>,
    pub usernames: Vec<String>,
}

/// System crontabs are `/etc/crontab`, anything under `/etc/cron.d`, and any
/// file whose name contains "system".
pub fn is_system_path(path: &Path) -> bool {
    path == Path::new("/etc/crontab")
        || path.to_string_lossy().starts_with("/etc/cron.d")
        || path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains("system"))
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Regular files directly inside `dir` whose names cron would run.
pub fn expand_dir(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for path in entries.flatten().filter(|p| p.is_file()) {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let reasons = check_filename(&name);
        if reasons.is_empty() {
            files.push(path);
        } else {
            warn!("{}: invalid cron filename: {}", path.display(), reasons.join("; "));
        }
    }
    files
}

/// Resolve a request into targets, in order: `-S`, `-U`, `-u`, then
/// positional arguments. Duplicate files keep their first occurrence.
pub fn resolve<F>(request: &Request, find_crontab: F) -> Vec<Target>
where
    F: Fn(&str) -> Option<CrontabSource>,
{
    let mut targets = Vec::new();

    for path in &request.system {
        if path.is_dir() {
            targets.extend(expand_dir(path).into_iter().map(|f| Target::file(f, CrontabKind::System, true)));
        } else {
            targets.push(Target::file(path.clone(), CrontabKind::System, true));
        }
    }

    for path in &request.user {
        targets.push(Target::file(path.clone(), CrontabKind::User, true));
    }

    for user in &request.usernames {
        match user_target(user, &find_crontab) {
            Some(target) => {
                info!("Found user crontab for {user}: {}", target.label());
                targets.push(target);
            }
            None => warn!("User crontab not found for: {user}"),
        }
    }

    for arg in &request.args {
        let path = Path::new(arg);
        if path.is_file() {
            let full = absolute(path);
            let kind = kind_for(&full);
            targets.push(Target::file(full, kind, true));
        } else if path.is_dir() {
            for file in expand_dir(path) {
                let full = absolute(&file);
                let kind = kind_for(&full);
                targets.push(Target::file(full, kind, true));
            }
        } else if is_valid_username(arg) {
            match user_target(arg, &find_crontab) {
                Some(target) => {
                    info!("{arg} user found: {}", target.label());
                    targets.push(target);
                }
                None => warn!("{arg} user not found or has no crontab"),
            }
        } else {
            warn!("{arg} File not found and is not a valid username");
        }
    }

    dedupe(targets)
}

fn kind_for(path: &Path) -> CrontabKind {
    if is_system_path(path) {
        CrontabKind::System
    } else {
        CrontabKind::User
    }
}

fn user_target<F>(user: &str, find_crontab: &F) -> Option<Target>
where
    F: Fn(&str) -> Option<CrontabSource>,
{
    let source = match find_crontab(user)? {
        CrontabSource::Path(path) => Source::File(path),
        CrontabSource::Fetched(text) => Source::Fetched { user: user.to_string(), text },
    };
    Some(Target { source, kind: CrontabKind::User, check_name: false })
}

fn dedupe(targets: Vec<Target>) -> Vec<Target> {
    let mut seen = HashSet::new();
    targets.into_iter().filter(|t| seen.insert(t.label())).collect()
}
