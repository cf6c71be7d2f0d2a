/// Time-field grammar: `*`, `n`, `a-b`, `*/n`, `a-b/n` and comma lists.
///
/// Validation runs in two passes. The logic pass checks numeric bounds,
/// range order, step values and list duplicates; when it finds nothing, the
/// whole field is matched against a per-field format pattern that rejects
/// anything else (letters, stray punctuation).
use std::collections::HashSet;

use cronlint_core::{
    CrontabKind, FieldSpec, Finding, DAY_OF_MONTH, DAY_OF_WEEK, HOUR, MINUTE, MONTH, TIME_FIELDS,
};
use once_cell::sync::Lazy;
use regex::Regex;

static MINUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|([0-5]?[0-9])(-([0-5]?[0-9]))?(/([0-9]+))?(,([0-5]?[0-9])(-([0-5]?[0-9]))?(/([0-9]+))?)*|\*/([0-9]+))$").unwrap()
});

static HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|([0-9]|1[0-9]|2[0-3])(-([0-9]|1[0-9]|2[0-3]))?(/([0-9]|1[0-9]|2[0-3]))?(,([0-9]|1[0-9]|2[0-3])(-([0-9]|1[0-9]|2[0-3]))?(/([0-9]|1[0-9]|2[0-3]))?)*|\*/([0-9]|1[0-9]|2[0-3]))$").unwrap()
});

static DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|([1-9]|[12][0-9]|3[01])(-([1-9]|[12][0-9]|3[01]))?(/([1-9]|[12][0-9]|3[01]))?(,([1-9]|[12][0-9]|3[01])(-([1-9]|[12][0-9]|3[01]))?(/([1-9]|[12][0-9]|3[01]))?)*|\*/([1-9]|[12][0-9]|3[01]))$").unwrap()
});

static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|([1-9]|1[0-2])(-([1-9]|1[0-2]))?(/([1-9]|1[0-2]))?(,([1-9]|1[0-2])(-([1-9]|1[0-2]))?(/([1-9]|1[0-2]))?)*|\*/([1-9]|1[0-2]))$").unwrap()
});

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|([0-7])(-([0-7]))?(/([0-7]))?(,([0-7])(-([0-7]))?)*|\*/([0-7]))$").unwrap()
});

/// Format pattern for one of the five standard columns.
fn format_pattern(spec: &FieldSpec) -> Option<&'static Regex> {
    match *spec {
        s if s == MINUTE => Some(&*MINUTE_RE),
        s if s == HOUR => Some(&*HOUR_RE),
        s if s == DAY_OF_MONTH => Some(&*DAY_RE),
        s if s == MONTH => Some(&*MONTH_RE),
        s if s == DAY_OF_WEEK => Some(&*WEEKDAY_RE),
        _ => None,
    }
}

/// Validate one time field against its domain.
pub fn validate_field(value: &str, spec: &FieldSpec) -> Vec<Finding> {
    validate_as(value, value, spec)
}

/// Validate the five schedule columns of a time entry, in column order.
///
/// In system crontabs a leading `-` on the minute field suppresses syslog
/// logging for the entry; it is stripped before validation there and only
/// there.
pub fn validate_schedule(schedule: &[&str; 5], kind: CrontabKind) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (&value, spec) in schedule.iter().zip(TIME_FIELDS.iter()) {
        if *spec == MINUTE && kind.is_system() {
            let stripped = value.strip_prefix('-').unwrap_or(value);
            findings.extend(validate_as(stripped, value, spec));
        } else {
            findings.extend(validate_field(value, spec));
        }
    }
    findings
}

/// `value` is what gets checked; `original` is what format messages quote.
fn validate_as(value: &str, original: &str, spec: &FieldSpec) -> Vec<Finding> {
    let findings = check_logic(value, spec);
    if !findings.is_empty() {
        return findings;
    }
    match format_pattern(spec) {
        Some(re) if !re.is_match(value) => vec![Finding::InvalidFormat {
            label: spec.label,
            value: original.to_string(),
        }],
        _ => findings,
    }
}

fn check_logic(value: &str, spec: &FieldSpec) -> Vec<Finding> {
    if value == "*" {
        return Vec::new();
    }
    if !value.contains(',') {
        return check_single(value, spec);
    }

    let mut findings = Vec::new();
    let mut seen = HashSet::new();
    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            findings.push(Finding::EmptyListValue {
                field: spec.name,
                value: value.to_string(),
            });
            continue;
        }
        // Duplicates are literal: "5" and "05" are different tokens.
        if !seen.insert(part) {
            findings.push(Finding::DuplicateValue {
                field: spec.name,
                part: part.to_string(),
                value: value.to_string(),
            });
        }
        findings.extend(check_single(part, spec));
    }
    findings
}

/// Check a single value, range, or step (no commas).
fn check_single(value: &str, spec: &FieldSpec) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(step) = value.strip_prefix("*/") {
        match Digits::parse(step) {
            Some(step) => {
                if step.is_zero() {
                    findings.push(Finding::NonPositiveStep {
                        field: spec.name,
                        value: value.to_string(),
                    });
                }
                // A step may exceed the range width, but not the field maximum.
                if step.exceeds(spec.max) {
                    findings.push(Finding::StepExceedsMax {
                        field: spec.name,
                        step: step.to_string(),
                        max: spec.max,
                        value: value.to_string(),
                    });
                }
            }
            None => findings.push(Finding::InvalidStep {
                field: spec.name,
                value: value.to_string(),
            }),
        }
        return findings;
    }

    if value.contains('-') {
        let parts: Vec<&str> = value.split('-').collect();
        // Non-numeric ranges (including `a-b/n`) are left to the format pattern.
        if let [start, end] = parts.as_slice() {
            if let (Some(start), Some(end)) = (Digits::parse(start), Digits::parse(end)) {
                if start > end {
                    findings.push(Finding::InvalidRange {
                        field: spec.name,
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                if !start.within(spec) {
                    findings.push(Finding::RangeStartOutOfBounds {
                        field: spec.name,
                        start: start.to_string(),
                        min: spec.min,
                        max: spec.max,
                        value: value.to_string(),
                    });
                }
                if !end.within(spec) {
                    findings.push(Finding::RangeEndOutOfBounds {
                        field: spec.name,
                        end: end.to_string(),
                        min: spec.min,
                        max: spec.max,
                        value: value.to_string(),
                    });
                }
            }
        }
        return findings;
    }

    if let Some(number) = Digits::parse(value) {
        if !number.within(spec) {
            findings.push(Finding::ValueOutOfBounds {
                field: spec.name,
                number: number.to_string(),
                min: spec.min,
                max: spec.max,
                value: value.to_string(),
            });
        }
    }
    findings
}

/// A non-empty run of ASCII digits with leading zeros stripped.
///
/// Kept as text so numbers too large for `u64` still compare and print
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Digits<'a>(&'a str);

impl<'a> Digits<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match s.trim_start_matches('0') {
            "" => Some(Digits("0")),
            digits => Some(Digits(digits)),
        }
    }

    fn value(self) -> Option<u64> {
        self.0.parse().ok()
    }

    fn is_zero(self) -> bool {
        self.0 == "0"
    }

    fn within(self, spec: &FieldSpec) -> bool {
        self.value().is_some_and(|n| spec.contains(n))
    }

    fn exceeds(self, max: u64) -> bool {
        self.value().map_or(true, |n| n > max)
    }
}

impl Ord for Digits<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.len().cmp(&other.0.len()).then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for Digits<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Digits<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(value: &str, spec: &FieldSpec) -> Vec<String> {
        validate_field(value, spec).iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn accepts_common_forms() {
        for value in ["*", "0", "59", "00", "0-59", "*/15", "1-10/3", "0,15,30,45", "5/2"] {
            assert!(validate_field(value, &MINUTE).is_empty(), "{value}");
        }
        for value in ["0", "7", "1-5", "0,7", "*/7"] {
            assert!(validate_field(value, &DAY_OF_WEEK).is_empty(), "{value}");
        }
    }

    #[test]
    fn value_out_of_bounds() {
        assert_eq!(
            messages("60", &MINUTE),
            vec!["value 60 out of bounds (0-59) for minutes: '60'"]
        );
        assert_eq!(messages("32", &DAY_OF_MONTH).len(), 1);
        assert_eq!(messages("0", &MONTH).len(), 1);
        assert_eq!(messages("8", &DAY_OF_WEEK).len(), 1);
    }

    #[test]
    fn step_rules() {
        assert_eq!(messages("*/0", &MINUTE), vec!["step value must be positive in minutes: '*/0'"]);
        assert_eq!(
            messages("*/100", &MINUTE),
            vec!["step value 100 exceeds maximum 59 for minutes: '*/100'"]
        );
        assert_eq!(messages("*/x", &HOUR), vec!["invalid step value in hours: '*/x'"]);
        assert_eq!(messages("*/-3", &MINUTE), vec!["invalid step value in minutes: '*/-3'"]);
        // wider than the 1-12 span is fine as long as it fits the maximum
        assert!(validate_field("*/12", &MONTH).is_empty());
    }

    #[test]
    fn range_rules() {
        assert_eq!(messages("10-5", &MINUTE), vec!["invalid range 10-5 in minutes: start > end"]);
        assert_eq!(
            messages("25-30", &HOUR),
            vec![
                "range start 25 out of bounds (0-23) for hours: '25-30'",
                "range end 30 out of bounds (0-23) for hours: '25-30'",
            ]
        );
        assert_eq!(
            messages("20-25", &HOUR),
            vec!["range end 25 out of bounds (0-23) for hours: '20-25'"]
        );
    }

    #[test]
    fn non_numeric_ranges_fall_through_to_format() {
        assert_eq!(messages("a-z", &HOUR), vec!["invalid hour format: 'a-z'"]);
        assert_eq!(messages("-", &HOUR), vec!["invalid hour format: '-'"]);
        assert_eq!(messages("1-@", &HOUR), vec!["invalid hour format: '1-@'"]);
        assert_eq!(messages("-1", &MINUTE), vec!["invalid minute format: '-1'"]);
    }

    #[test]
    fn list_rules() {
        assert_eq!(
            messages("0,,15", &MINUTE),
            vec!["empty value in minutes list: '0,,15'"]
        );
        assert_eq!(
            messages("5,5", &MINUTE),
            vec!["duplicate value '5' in minutes list: '5,5'"]
        );
        // every part is checked, no early exit
        assert_eq!(messages("60,61,5,5", &MINUTE).len(), 3);
    }

    #[test]
    fn garbage_is_a_format_error() {
        assert_eq!(messages("abc", &MINUTE), vec!["invalid minute format: 'abc'"]);
        assert_eq!(messages("A", &DAY_OF_WEEK), vec!["invalid day of week format: 'A'"]);
        assert_eq!(messages("1-5/2,3-4/2", &DAY_OF_WEEK).len(), 1);
    }

    #[test]
    fn hour_pattern_rejects_zero_padding() {
        assert_eq!(messages("00", &HOUR), vec!["invalid hour format: '00'"]);
    }

    #[test]
    fn huge_numbers_print_as_written() {
        assert_eq!(
            messages("99999999999999999999999", &MINUTE),
            vec!["value 99999999999999999999999 out of bounds (0-59) for minutes: '99999999999999999999999'"]
        );
        assert_eq!(
            messages("*/99999999999999999999", &MINUTE),
            vec!["step value 99999999999999999999 exceeds maximum 59 for minutes: '*/99999999999999999999'"]
        );
    }

    #[test]
    fn huge_range_bounds_still_compare() {
        let found = messages("99999999999999999999-99999999999999999998", &MINUTE);
        assert_eq!(found.len(), 3);
        assert_eq!(
            found[0],
            "invalid range 99999999999999999999-99999999999999999998 in minutes: start > end"
        );
    }

    #[test]
    fn leading_zeros_are_dropped_from_numbers() {
        assert_eq!(messages("075", &MINUTE), vec!["value 75 out of bounds (0-59) for minutes: '075'"]);
        assert!(messages("05", &MINUTE).is_empty());
    }

    #[test]
    fn dash_minute_only_for_system() {
        let schedule = ["-0", "2", "*", "*", "*"];
        assert!(validate_schedule(&schedule, CrontabKind::System).is_empty());
        let findings = validate_schedule(&schedule, CrontabKind::User);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].to_string(), "invalid minute format: '-0'");
    }

    #[test]
    fn dash_minute_format_message_quotes_original() {
        let findings = validate_schedule(&["-x", "*", "*", "*", "*"], CrontabKind::System);
        assert_eq!(findings[0].to_string(), "invalid minute format: '-x'");
    }

    #[test]
    fn schedule_findings_follow_column_order() {
        let findings = validate_schedule(&["60", "24", "32", "13", "8"], CrontabKind::User);
        let fields: Vec<&str> = findings
            .iter()
            .map(|f| match f {
                Finding::ValueOutOfBounds { field, .. } => *field,
                _ => "",
            })
            .collect();
        assert_eq!(fields, vec!["minutes", "hours", "day of month", "month", "day of week"]);
    }
}
