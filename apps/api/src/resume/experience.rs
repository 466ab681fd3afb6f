//! Experience entry extraction.
//!
//! Three passes, each only used when the previous one found nothing:
//! title-at-company lines, a short look-ahead window after lines that mention
//! experience/work/employment, then bare role-title lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::fields::{push_unique, truncate_chars, FieldEntries};
use crate::resume::sections::{is_heading_line, SectionKind, SectionMap};

pub const MAX_EXPERIENCE_ENTRIES: usize = 5;
pub const EXPERIENCE_PLACEHOLDER: &str = "Professional experience information detected";

const LOOKAHEAD_LINES: usize = 4;
const MIN_TITLE_MATCH_CHARS: usize = 15;
const MIN_WINDOW_LINE_CHARS: usize = 11;
const MAX_TITLE_LINE_CHARS: usize = 80;
const MAX_BARE_TITLES: usize = 3;
const MAX_ENTRY_CHARS: usize = 150;

static TITLE_AT_COMPANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:[a-z][\w/&+.\-]*[ \t]+){0,4}(?:developer|engineer|manager|lead|architect|analyst|consultant|designer|director|scientist|administrator|specialist|officer|intern)[ \t]+(?:at|@)[ \t]*[a-z0-9][^\n,;|]{1,60}",
    )
    .unwrap()
});

static EXPERIENCE_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:experience|work|employment)\b").unwrap());

static ROLE_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:developer|engineer|manager|architect|analyst|consultant|designer|director|scientist|administrator|specialist)\b",
    )
    .unwrap()
});

pub fn extract_experience(full_text: &str, sections: &SectionMap) -> FieldEntries {
    let scoped = sections.or_full_text(SectionKind::Experience, full_text);

    let mut entries = title_at_company(scoped);
    if entries.is_empty() {
        entries = match sections.get(SectionKind::Experience) {
            // The section heading plays the part of the keyword line.
            Some(section) => window(section.lines().map(str::trim)),
            None => keyword_window(full_text),
        };
    }
    if entries.is_empty() {
        entries = bare_titles(scoped);
    }

    entries.truncate(MAX_EXPERIENCE_ENTRIES);
    FieldEntries::or_placeholder(entries, EXPERIENCE_PLACEHOLDER)
}

fn title_at_company(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for found in TITLE_AT_COMPANY_RE.find_iter(text) {
        let entry = found.as_str().trim();
        if entry.chars().count() >= MIN_TITLE_MATCH_CHARS {
            push_unique(&mut entries, truncate_chars(entry, MAX_ENTRY_CHARS));
        }
    }
    entries
}

/// Lines following a keyword line, stopping at the next section heading.
/// Only used when there is no experience section to scope the search.
fn keyword_window(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !EXPERIENCE_KEYWORD_RE.is_match(line) {
            continue;
        }
        for entry in window(lines.iter().skip(i + 1).copied()) {
            push_unique(&mut entries, &entry);
        }
    }
    entries
}

/// Up to `LOOKAHEAD_LINES` lines, cut short by a section heading.
fn window<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut entries = Vec::new();
    for next in lines.take(LOOKAHEAD_LINES) {
        if is_heading_line(next) {
            break;
        }
        if next.chars().count() >= MIN_WINDOW_LINE_CHARS {
            push_unique(&mut entries, truncate_chars(next, MAX_ENTRY_CHARS));
        }
    }
    entries
}

fn bare_titles(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for line in text.lines().map(str::trim) {
        let len = line.chars().count();
        if len < MIN_WINDOW_LINE_CHARS || len > MAX_TITLE_LINE_CHARS {
            continue;
        }
        if line.contains('@') || is_heading_line(line) {
            continue;
        }
        if ROLE_WORD_RE.is_match(line) {
            push_unique(&mut entries, line);
        }
        if entries.len() >= MAX_BARE_TITLES {
            break;
        }
    }
    entries
}
