//! Shared vocabulary for the cronlint workspace: crontab kinds, field
//! domains, findings and their rendered diagnostics.

pub mod diagnostic;
pub mod error;
pub mod traits;
pub mod types;

pub use diagnostic::{clean_line, Diagnostic, Finding, Severity};
pub use error::{CronlintError, Result};
pub use traits::{AssumeUsersExist, UserLookup};
pub use types::{
    CrontabKind, FieldSpec, LogicalLine, SpecialKeyword, DAY_OF_MONTH, DAY_OF_WEEK, HOUR, MINUTE,
    MONTH, SYSTEM_MAX_FIELDS, TIME_FIELDS,
};
