use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s+\n").unwrap());
static INLINE_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Collapses line-break and spacing noise while keeping paragraph structure.
///
/// Only whitespace is touched. Lone `\r` is treated as a line break so that a
/// second pass never sees a freshly formed `\r\n`, which keeps the function
/// idempotent.
pub fn normalize(text: &str) -> String {
    let unix = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = BLANK_LINES_RE.replace_all(&unix, "\n");
    let spaced = INLINE_SPACE_RE.replace_all(&collapsed, " ");
    spaced.trim().to_string()
}

/// Number of alphanumeric characters, the measure used for "usable" text.
pub fn usable_chars(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}
