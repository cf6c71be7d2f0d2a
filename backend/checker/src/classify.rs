//! Decide what kind of crontab line we are looking at.

/// A classified logical line. Tokens borrow from the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank line or comment.
    Skip,
    /// Shell-style `NAME=value`; not a schedule entry.
    EnvAssignment,
    /// `@keyword ...`: the keyword candidate and the remaining tokens.
    Special { keyword: &'a str, fields: Vec<&'a str> },
    /// Everything else, split on whitespace.
    Time { tokens: Vec<&'a str> },
}

pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Skip;
    }

    if let Some((name, _)) = line.split_once('=') {
        if !name.chars().any(|c| c.is_ascii_digit() || c == '*' || c == '@') {
            return Line::EnvAssignment;
        }
    }

    let mut tokens = line.split_whitespace();
    if line.starts_with('@') {
        let keyword = tokens.next().unwrap_or(line);
        return Line::Special { keyword, fields: tokens.collect() };
    }
    Line::Time { tokens: tokens.collect() }
}
