//! Host-side collaborators for cronlint.
//!
//! Everything here is advisory: a probe that cannot run never turns into a
//! crontab error. User lookups answer "exists", the daemon check returns a
//! warning, and the crontab fetch returns nothing.

pub mod crontab;
pub mod permissions;
pub mod probe;
pub mod service;
pub mod users;

pub use crontab::{fetch_crontab, find_user_crontab, spool_candidates, CrontabSource};
pub use permissions::{check_kind, check_owner_and_permissions, PathKind, EXPECTED_MODE, ROOT_UID};
pub use probe::{Probe, ProbeOutcome, ProbeOutput, DEFAULT_TIMEOUT};
pub use service::check_daemon;
pub use users::SystemUsers;
