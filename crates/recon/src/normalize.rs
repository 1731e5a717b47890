/// Comparison key for a display name: lower-cased ASCII letters and digits
/// only. Total and idempotent.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Case-insensitive, whitespace-trimmed email equality. Blank never matches.
pub fn emails_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}
