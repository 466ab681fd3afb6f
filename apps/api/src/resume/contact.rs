//! Contact details: email, phone, profile links and a best-guess name.
//!
//! The name guess takes the first short line shaped like capitalised words. It
//! misfires on résumés that open with a job title; callers that need a reliable
//! name should ask the user to confirm it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::ContactInfo;
use crate::resume::sections::is_heading_line;

const MAX_NAME_CHARS: usize = 50;
const NAME_SCAN_LINES: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// Tried in order; the first hit wins. Group 1 is the number. The leading
/// non-digit guard keeps the US pattern from starting inside a longer run.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:^|[^\d])((?:\+?1[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4})\b",
        r"(\+\d{1,3}[\s.-]?\d{6,14})\b",
        r"\b(\d{10,})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/([A-Za-z0-9_-]+)").unwrap()
});

static GITHUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9_-]+)").unwrap());

static NAME_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z'.\-]*(?:[ \t]+[A-Z][A-Za-z'.\-]*){1,3}$").unwrap()
});

pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        name: extract_name(text),
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: extract_phone(text),
        linkedin: LINKEDIN_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|slug| format!("linkedin.com/in/{}", slug.as_str())),
        github: GITHUB_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|slug| format!("github.com/{}", slug.as_str())),
    }
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str().trim().to_string())
}

fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .filter(|line| !looks_like_contact_line(line) && !is_heading_line(line))
        .find(|line| line.chars().count() < MAX_NAME_CHARS && NAME_LINE_RE.is_match(line))
        .map(str::to_string)
}

fn looks_like_contact_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.contains('@')
        || line.contains('|')
        || lower.contains("http")
        || lower.contains("www.")
        || lower.contains(".com")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Jane Q Doe\njane.doe@example.com | (555) 123-4567\nlinkedin.com/in/jane-doe\nhttps://github.com/janedoe/project";

    #[test]
    fn test_extracts_all_contact_fields() {
        let contact = extract_contact(HEADER);
        assert_eq!(contact.name.as_deref(), Some("Jane Q Doe"));
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(contact.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(contact.github.as_deref(), Some("github.com/janedoe"));
    }

    #[test]
    fn test_international_phone() {
        let contact = extract_contact("Call +4915112345678 anytime");
        assert_eq!(contact.phone.as_deref(), Some("+4915112345678"));
    }

    #[test]
    fn test_us_phone_with_country_code() {
        let contact = extract_contact("Phone: +1 415.555.0199");
        assert_eq!(contact.phone.as_deref(), Some("+1 415.555.0199"));
    }

    #[test]
    fn test_name_skips_contact_and_heading_lines() {
        let text = "john@example.com\nSUMMARY\nJohn Smith\nEngineer";
        let contact = extract_contact(text);
        assert_eq!(contact.name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_title_first_line_is_taken_as_name() {
        // Known limitation of the heuristic.
        let contact = extract_contact("Software Engineer\nJohn Smith");
        assert_eq!(contact.name.as_deref(), Some("Software Engineer"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let contact = extract_contact("just some lowercase text");
        assert_eq!(contact, ContactInfo::default());
    }
}
