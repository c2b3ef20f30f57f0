use std::sync::LazyLock;

use regex::Regex;

// Everything outside Hangul syllables, ASCII alphanumerics and whitespace.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^가-힣a-zA-Z0-9\s]").unwrap());

/// Replace disallowed characters with spaces, collapse whitespace runs to
/// a single space, and trim the ends. Hangul syllables pass through
/// untouched.
pub fn remove_special_chars_with_space(text: &str) -> String {
    let cleaned = DISALLOWED.replace_all(text, " ");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Tests ──
