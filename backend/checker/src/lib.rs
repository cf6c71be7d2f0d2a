//! Crontab validation engine.
//!
//! [`scan_source`] and [`scan_file`] drive everything: they join continued
//! lines, classify each logical line, and run the entry, user, command and
//! time-field checks. Findings come back as values; nothing here fails on
//! bad crontab content.

pub mod classify;
pub mod command;
pub mod entry;
pub mod filename;
pub mod grammar;
pub mod scanner;
pub mod user;

pub use classify::{classify, Line};
pub use command::check_command;
pub use entry::{
    check_entry, check_line, check_logical_line, parse_special, parse_time, Entry, LineReport,
    SpecialEntry, TimeEntry,
};
pub use filename::check_filename;
pub use grammar::{validate_field, validate_schedule};
pub use scanner::{display_name, logical_lines, read_crontab, scan_file, scan_source, ScanOutcome};
pub use user::{check_user, is_valid_username};

#[cfg(test)]
mod proptests {
    use super::*;
    use cronlint_core::{
        AssumeUsersExist, CrontabKind, FieldSpec, Finding, SpecialKeyword, DAY_OF_MONTH,
        DAY_OF_WEEK, HOUR, MINUTE, MONTH,
    };
    use proptest::prelude::*;

    fn any_spec() -> impl Strategy<Value = FieldSpec> {
        prop_oneof![
            Just(MINUTE),
            Just(HOUR),
            Just(DAY_OF_MONTH),
            Just(MONTH),
            Just(DAY_OF_WEEK),
        ]
    }

    /// One list element: a value, a range, or a stepped range.
    fn element(spec: FieldSpec) -> impl Strategy<Value = String> {
        let value = spec.min..=spec.max;
        prop_oneof![
            value.clone().prop_map(|n| n.to_string()),
            (value.clone(), value.clone()).prop_map(|(a, b)| {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                format!("{lo}-{hi}")
            }),
            (value.clone(), value, 1..=spec.max.max(1)).prop_map(|(a, b, n)| {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                format!("{lo}-{hi}/{n}")
            }),
        ]
    }

    /// Any value the grammar accepts for `spec`.
    fn valid_field(spec: FieldSpec) -> BoxedStrategy<String> {
        prop_oneof![
            Just("*".to_string()),
            (1..=spec.max).prop_map(|n| format!("*/{n}")),
            element(spec),
            prop::collection::btree_set(spec.min..=spec.max, 2..5).prop_map(|set| {
                set.into_iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",")
            }),
        ]
        .boxed()
    }

    fn valid_schedule() -> impl Strategy<Value = Vec<String>> {
        (
            valid_field(MINUTE),
            valid_field(HOUR),
            valid_field(DAY_OF_MONTH),
            valid_field(MONTH),
            valid_field(DAY_OF_WEEK),
        )
            .prop_map(|(m, h, d, mo, w)| vec![m, h, d, mo, w])
    }

    fn command() -> impl Strategy<Value = String> {
        "/usr/(s)?bin/[a-z]{1,12}( --[a-z]{1,8}){0,3}"
    }

    fn keyword() -> impl Strategy<Value = SpecialKeyword> {
        prop::sample::select(SpecialKeyword::ALL.to_vec())
    }

    proptest! {
        /// Valid values never produce findings.
        #[test]
        fn valid_fields_are_clean(
            (spec, value) in any_spec().prop_flat_map(|spec| (Just(spec), valid_field(spec)))
        ) {
            let findings = validate_field(&value, &spec);
            prop_assert!(findings.is_empty(), "{} {}: {:?}", spec.name, value, findings);
        }

        /// A descending in-domain range yields exactly one range finding.
        #[test]
        fn descending_range_is_one_finding(
            (spec, a, b) in any_spec().prop_flat_map(|spec| {
                (Just(spec), spec.min..=spec.max, spec.min..=spec.max)
            })
        ) {
            prop_assume!(a != b);
            let (hi, lo) = if a > b { (a, b) } else { (b, a) };
            let findings = validate_field(&format!("{hi}-{lo}"), &spec);
            prop_assert_eq!(findings.len(), 1);
            let is_range = matches!(findings[0], Finding::InvalidRange { .. });
            prop_assert!(is_range);
        }

        /// Steps above the field maximum are rejected.
        #[test]
        fn oversized_step_is_rejected(
            (spec, step) in any_spec().prop_flat_map(|spec| (Just(spec), spec.max + 1..10_000u64))
        ) {
            let findings = validate_field(&format!("*/{step}"), &spec);
            prop_assert_eq!(findings.len(), 1);
            let is_step = matches!(findings[0], Finding::StepExceedsMax { .. });
            prop_assert!(is_step);
        }

        /// Zero steps are rejected whatever the padding.
        #[test]
        fn zero_step_is_rejected(spec in any_spec(), zeros in 1usize..4) {
            let findings = validate_field(&format!("*/{}", "0".repeat(zeros)), &spec);
            let is_positive = findings.iter().any(|f| matches!(f, Finding::NonPositiveStep { .. }));
            prop_assert!(is_positive);
        }

        /// Repeating a literal token in a list is always reported.
        #[test]
        fn repeated_token_is_duplicate(
            (spec, token) in any_spec().prop_flat_map(|spec| (Just(spec), element(spec)))
        ) {
            let findings = validate_field(&format!("{token},{token}"), &spec);
            let is_dup = findings.iter().any(|f| matches!(f, Finding::DuplicateValue { .. }));
            prop_assert!(is_dup);
        }

        /// Generated user entries are clean.
        #[test]
        fn generated_user_lines_are_clean(schedule in valid_schedule(), cmd in command()) {
            let line = format!("{} {}", schedule.join(" "), cmd);
            let findings = check_line(&line, CrontabKind::User, &AssumeUsersExist);
            prop_assert!(findings.is_empty(), "{}: {:?}", line, findings);
        }

        /// Generated system entries are clean.
        #[test]
        fn generated_system_lines_are_clean(
            schedule in valid_schedule(),
            user in "[a-z][a-z0-9_-]{0,15}",
            cmd in command(),
        ) {
            let line = format!("{} {} {}", schedule.join(" "), user, cmd);
            let findings = check_line(&line, CrontabKind::System, &AssumeUsersExist);
            prop_assert!(findings.is_empty(), "{}: {:?}", line, findings);
        }

        /// Every keyword works for both kinds with the right columns.
        #[test]
        fn generated_special_lines_are_clean(kw in keyword(), cmd in command()) {
            let user_line = format!("{kw} {cmd}");
            prop_assert!(check_line(&user_line, CrontabKind::User, &AssumeUsersExist).is_empty());
            let system_line = format!("{kw} root {cmd}");
            prop_assert!(check_line(&system_line, CrontabKind::System, &AssumeUsersExist).is_empty());
        }

        /// Scanning is deterministic for arbitrary input.
        #[test]
        fn scan_is_idempotent(text in "[0-9*/,@a-z \t\\\\\n-]{0,200}") {
            let first = scan_source("crontab", &text, CrontabKind::User, &AssumeUsersExist, |_| {});
            let second = scan_source("crontab", &text, CrontabKind::User, &AssumeUsersExist, |_| {});
            prop_assert_eq!(first, second);
        }
    }
}
