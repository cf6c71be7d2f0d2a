/// run-parts naming rules for files dropped into cron directories.
///
/// Returns every rule the name breaks; an empty list means the name is
/// acceptable.
pub fn check_filename(name: &str) -> Vec<String> {
    if name.is_empty() {
        return vec!["empty name".to_string()];
    }

    let mut reasons = Vec::new();
    if name.starts_with('.') {
        reasons.push("starts with '.'".to_string());
    }
    if name.ends_with('~') {
        reasons.push("ends with '~'".to_string());
    }
    if name.contains('.') {
        reasons.push("contains '.'".to_string());
    }
    if name.contains('#') {
        reasons.push("contains '#'".to_string());
    }
    if name.contains(',') {
        reasons.push("contains ','".to_string());
    }
    let outside = |c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if name.chars().any(|c| outside(c) && !matches!(c, '.' | '~' | '#' | ',')) {
        reasons.push("contains characters outside [A-Za-z0-9_-]".to_string());
    }
    reasons
}
