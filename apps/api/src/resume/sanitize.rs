//! Display sanitizer for `extractedText`.
//!
//! Text that looks like leaked PDF structure or binary noise is replaced by a
//! fixed "processed" message instead of being shown to the user.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::Serialize;

pub const DEFAULT_DISPLAY_MAX_CHARS: usize = 1000;
pub const MAX_SPECIAL_CHAR_RATIO: f64 = 0.30;
pub const MIN_DISPLAY_CHARS: usize = 20;

pub const PROCESSED_PLACEHOLDER: &str = "Resume content successfully extracted and processed. \
Your skills, experience, and education were identified from the uploaded document \
and are being used to build your profile.";

const PUNCTUATION: &str = ".,!?;:'\"()[]{}@#$%&*+-=<>/\\|_";

static BINARY_SIGNATURES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"%PDF-\d\.\d",
        r"\b\d+\s+\d+\s+obj\b",
        r"\bendobj\b",
        r"\bendstream\b",
        r"(?m)^[ \t]*stream[ \t]*$",
        r"<<\s*/[A-Za-z]+",
        r"/(?:FlateDecode|ASCIIHexDecode|ASCII85Decode|LZWDecode|DCTDecode|RunLengthDecode|CCITTFaxDecode|JBIG2Decode|JPXDecode)\b",
        r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]{4,}",
    ])
    .unwrap()
});

static INLINE_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    BinarySignature,
    SpecialCharacters,
    TooShort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizedText {
    pub text: String,
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BlockReason>,
}

impl SanitizedText {
    fn blocked(reason: BlockReason) -> Self {
        Self {
            text: PROCESSED_PLACEHOLDER.to_string(),
            blocked: true,
            reason: Some(reason),
        }
    }
}

pub fn sanitize_for_display(text: &str, max_chars: usize) -> SanitizedText {
    if BINARY_SIGNATURES.is_match(text) {
        return SanitizedText::blocked(BlockReason::BinarySignature);
    }
    if special_char_ratio(text) > MAX_SPECIAL_CHAR_RATIO {
        return SanitizedText::blocked(BlockReason::SpecialCharacters);
    }

    let cleaned = clean(text);
    if cleaned.chars().count() < MIN_DISPLAY_CHARS {
        return SanitizedText::blocked(BlockReason::TooShort);
    }

    SanitizedText {
        text: truncate_for_display(&cleaned, max_chars),
        blocked: false,
        reason: None,
    }
}

/// Share of characters that are neither alphanumeric, whitespace, nor common
/// punctuation.
fn special_char_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let special = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !PUNCTUATION.contains(*c))
        .count();
    special as f64 / total as f64
}

fn clean(text: &str) -> String {
    let without_controls: String = text
        .chars()
        .map(|c| match c {
            '\r' => '\n',
            '\n' | '\t' => c,
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    let spaced = INLINE_SPACE_RE.replace_all(&without_controls, " ");
    BLANK_LINES_RE.replace_all(&spaced, "\n").trim().to_string()
}

fn truncate_for_display(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = "Jane Doe\njane@example.com\nSKILLS\nPython, React, AWS\nSenior Engineer at Acme (2019-2023)";

    #[test]
    fn test_clean_text_round_trips() {
        let out = sanitize_for_display(CLEAN, DEFAULT_DISPLAY_MAX_CHARS);
        assert!(!out.blocked);
        assert_eq!(out.reason, None);
        assert_eq!(out.text, CLEAN);
    }

    #[test]
    fn test_whitespace_is_tidied() {
        let out = sanitize_for_display("Jane   Doe\r\n\r\n\r\nSenior\tEngineer at Acme  ", 1000);
        assert_eq!(out.text, "Jane Doe\nSenior Engineer at Acme");
    }

    #[test]
    fn test_pdf_structure_is_blocked() {
        for leaked in [
            "%PDF-1.4 some header text that is long enough",
            "text before 12 0 obj and a bit more text after it",
            "<< /Type /Catalog /Pages 2 0 R >> plus padding words",
            "some words\nstream\nx\u{9c}\nendstream",
            "encoded with /FlateDecode filter and other words",
        ] {
            let out = sanitize_for_display(leaked, 1000);
            assert!(out.blocked, "not blocked: {leaked}");
            assert_eq!(out.reason, Some(BlockReason::BinarySignature));
            assert_eq!(out.text, PROCESSED_PLACEHOLDER);
        }
    }

    #[test]
    fn test_control_run_is_blocked() {
        let out = sanitize_for_display("Jane Doe \u{1}\u{2}\u{3}\u{4} Engineer at Acme", 1000);
        assert_eq!(out.reason, Some(BlockReason::BinarySignature));
    }

    #[test]
    fn test_special_character_ratio_blocks() {
        let out = sanitize_for_display("þÿ¤¦§¨©ª«¬®¯°±²³ abcdef", 1000);
        assert_eq!(out.reason, Some(BlockReason::SpecialCharacters));
    }

    #[test]
    fn test_short_text_blocks() {
        let out = sanitize_for_display("Jane Doe", 1000);
        assert_eq!(out.reason, Some(BlockReason::TooShort));
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let long = "word ".repeat(400);
        let out = sanitize_for_display(&long, 1000);
        assert!(!out.blocked);
        assert_eq!(out.text.chars().count(), 1003);
        assert!(out.text.ends_with("..."));
    }

    #[test]
    fn test_accented_names_are_not_special() {
        let text = "José Álvarez Müller, Ingeniero de Software en Bogotá";
        assert!(!sanitize_for_display(text, 1000).blocked);
    }

    #[test]
    fn test_serializes_without_reason_when_clean() {
        let json = serde_json::to_value(sanitize_for_display(CLEAN, 1000)).unwrap();
        assert_eq!(json["blocked"], false);
        assert!(json.get("reason").is_none());
    }
}
