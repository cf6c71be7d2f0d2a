use cronlint_core::{Finding, UserLookup};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]{0,31}$").unwrap());

/// Whether `name` is shaped like a POSIX login name.
pub fn is_valid_username(name: &str) -> bool {
    USERNAME_RE.is_match(name)
}

/// Check the user column of a system entry.
///
/// Bad syntax is an error. A well-formed name the lookup does not know is
/// only a warning: the host running the check may not see the target
/// machine's user database.
pub fn check_user(user: &str, users: &dyn UserLookup) -> Vec<Finding> {
    let malformed = user.is_empty()
        || user.starts_with('#')
        || user.contains(['"', '@', ' '])
        || !is_valid_username(user);
    if malformed {
        return vec![Finding::InvalidUser { user: user.to_string() }];
    }
    if !users.exists(user) {
        return vec![Finding::UnknownUser { user: user.to_string() }];
    }
    Vec::new()
}
