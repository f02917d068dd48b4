/// Splits one line into `(name, value)`.
///
/// The line is trimmed, then split on every occurrence of `delimiter`. Only a
/// line with exactly one occurrence yields a pair, with both sides trimmed;
/// anything else (no delimiter, or the delimiter repeated inside the value)
/// is skipped without complaint.
///
/// ```
/// use varhandler::parse_line;
///
/// assert_eq!(parse_line("  width = 3 ", "="), Some(("width", "3")));
/// assert_eq!(parse_line("a=b=c", "="), None);
/// assert_eq!(parse_line("just text", "="), None);
/// ```
pub fn parse_line<'a>(line: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    if delimiter.is_empty() {
        return None;
    }

    let mut parts = line.trim().split(delimiter);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Some((name.trim(), value.trim())),
        _ => None,
    }
}

#[test]
fn test_multi_char_delimiter() {
    assert_eq!(parse_line("key :: value", "::"), Some(("key", "value")));
    assert_eq!(parse_line("key : value", "::"), None);
}

#[test]
fn test_empty_sides() {
    assert_eq!(parse_line("=", "="), Some(("", "")));
    assert_eq!(parse_line("a=", "="), Some(("a", "")));
    assert_eq!(parse_line("", "="), None);
}
