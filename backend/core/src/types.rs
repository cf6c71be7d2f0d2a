use std::fmt;

use serde::{Deserialize, Serialize};

/// Which crontab flavour a file is checked as.
///
/// System crontabs (`/etc/crontab`, `/etc/cron.d/*`) carry a user column
/// between the schedule and the command; per-user crontabs do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrontabKind {
    User,
    System,
}

impl CrontabKind {
    /// Minimum whitespace-separated tokens for a five-field time entry.
    pub fn min_time_fields(self) -> usize {
        match self {
            CrontabKind::User => 6,
            CrontabKind::System => 7,
        }
    }

    /// Minimum tokens (keyword included) for an `@keyword` entry.
    pub fn min_special_fields(self) -> usize {
        match self {
            CrontabKind::User => 2,
            CrontabKind::System => 3,
        }
    }

    pub fn is_system(self) -> bool {
        matches!(self, CrontabKind::System)
    }
}

impl fmt::Display for CrontabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrontabKind::User => write!(f, "user"),
            CrontabKind::System => write!(f, "system"),
        }
    }
}

/// Maximum tokens of a system time entry whose command is a single word.
pub const SYSTEM_MAX_FIELDS: usize = 7;

/// Numeric domain of one time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used in logic-level messages ("minutes", "day of week", ...).
    pub name: &'static str,
    /// Name used in format messages ("minute", "day of week", ...).
    pub label: &'static str,
    pub min: u64,
    pub max: u64,
}

impl FieldSpec {
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const MINUTE: FieldSpec = FieldSpec { name: "minutes", label: "minute", min: 0, max: 59 };
pub const HOUR: FieldSpec = FieldSpec { name: "hours", label: "hour", min: 0, max: 23 };
pub const DAY_OF_MONTH: FieldSpec =
    FieldSpec { name: "day of month", label: "day of month", min: 1, max: 31 };
pub const MONTH: FieldSpec = FieldSpec { name: "month", label: "month", min: 1, max: 12 };
// 7 is accepted as an alias for Sunday and left as written.
pub const DAY_OF_WEEK: FieldSpec =
    FieldSpec { name: "day of week", label: "day of week", min: 0, max: 7 };

/// The five time columns in the order they appear on a line.
pub const TIME_FIELDS: [FieldSpec; 5] = [MINUTE, HOUR, DAY_OF_MONTH, MONTH, DAY_OF_WEEK];

/// `@keyword` schedule aliases accepted in place of the five time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKeyword {
    Reboot,
    Yearly,
    Annually,
    Monthly,
    Weekly,
    Daily,
    Midnight,
    Hourly,
}

impl SpecialKeyword {
    pub const ALL: [SpecialKeyword; 8] = [
        SpecialKeyword::Reboot,
        SpecialKeyword::Yearly,
        SpecialKeyword::Annually,
        SpecialKeyword::Monthly,
        SpecialKeyword::Weekly,
        SpecialKeyword::Daily,
        SpecialKeyword::Midnight,
        SpecialKeyword::Hourly,
    ];

    /// Parse the literal token, `@` included. Matching is case-sensitive.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == token)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialKeyword::Reboot => "@reboot",
            SpecialKeyword::Yearly => "@yearly",
            SpecialKeyword::Annually => "@annually",
            SpecialKeyword::Monthly => "@monthly",
            SpecialKeyword::Weekly => "@weekly",
            SpecialKeyword::Daily => "@daily",
            SpecialKeyword::Midnight => "@midnight",
            SpecialKeyword::Hourly => "@hourly",
        }
    }
}

impl fmt::Display for SpecialKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One crontab entry after backslash-continuation joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Joined text handed to the classifier.
    pub text: String,
    /// 1-based number of the first physical line.
    pub line_number: usize,
    /// First physical line as written; shown in diagnostics.
    pub display: String,
}
