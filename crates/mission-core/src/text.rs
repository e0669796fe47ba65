/// Keep the first `max_chars` characters. Returns the kept prefix and
/// whether anything was cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&s[..byte_idx], true),
        None => (s, false),
    }
}

/// Truncate to `max_chars` characters, appending `suffix` only when cut.
pub fn truncate_with(s: &str, max_chars: usize, suffix: &str) -> String {
    match truncate_chars(s, max_chars) {
        (kept, true) => format!("{kept}{suffix}"),
        (kept, false) => kept.to_string(),
    }
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_title(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case- and whitespace-insensitive identity of a title.
pub fn title_key(s: &str) -> String {
    normalize_title(s).to_lowercase()
}
