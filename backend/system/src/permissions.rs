//! Ownership and permission probe for system crontabs.

use std::fmt;
use std::fs;
use std::path::Path;

/// Mode cron expects on `/etc/crontab` and `/etc/cron.d/*`.
pub const EXPECTED_MODE: u32 = 0o644;
pub const ROOT_UID: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    RegularFile,
    Directory,
    Symlink,
    Other,
    Missing,
}

impl PathKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PathKind::RegularFile => "regular_file",
            PathKind::Directory => "directory",
            PathKind::Symlink => "symlink",
            PathKind::Other => "other",
            PathKind::Missing => "missing",
        }
    }

    fn of(meta: &fs::Metadata) -> Self {
        let ft = meta.file_type();
        if ft.is_symlink() {
            PathKind::Symlink
        } else if ft.is_file() {
            PathKind::RegularFile
        } else if ft.is_dir() {
            PathKind::Directory
        } else {
            PathKind::Other
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn check_kind(path: &Path, follow_symlink: bool) -> PathKind {
    let meta = if follow_symlink { fs::metadata(path) } else { fs::symlink_metadata(path) };
    match meta {
        Ok(meta) => PathKind::of(&meta),
        Err(_) => PathKind::Missing,
    }
}

/// Problems with where a crontab lives and who owns it. Never fails; every
/// problem is a message.
#[cfg(unix)]
pub fn check_owner_and_permissions(path: &Path, expected_mode: u32, owner_uid: u32) -> Vec<String> {
    use std::os::unix::fs::MetadataExt;

    let Ok(link_meta) = fs::symlink_metadata(path) else {
        return vec!["file does not exist".to_string()];
    };

    let mut problems = Vec::new();
    let meta = if link_meta.file_type().is_symlink() {
        let Ok(target) = fs::metadata(path) else {
            return vec!["broken symlink".to_string()];
        };
        if link_meta.uid() != owner_uid {
            problems.push("wrong symlink owner".to_string());
        }
        target
    } else {
        link_meta
    };

    if !meta.is_file() {
        problems.push(format!("not a regular_file ({})", PathKind::of(&meta)));
        return problems;
    }

    let mode = meta.mode() & 0o777;
    if mode != expected_mode {
        problems.push(format!("wrong permissions: {mode:04o} (expected {expected_mode:04o})"));
    }
    if meta.uid() != owner_uid {
        problems.push(format!("wrong owner: uid {} (expected {owner_uid})", meta.uid()));
    }
    problems
}

#[cfg(not(unix))]
pub fn check_owner_and_permissions(_path: &Path, _expected_mode: u32, _owner_uid: u32) -> Vec<String> {
    Vec::new()
}
