//! PDF text recovery tiers.
//!
//! Tier 1 reads the text layer with `pdf-extract`. Tier 2 decodes the stream
//! as Latin-1 and harvests `Tj`/`TJ` string operands, falling back to résumé
//! fragment patterns. Tier 3 scans a bounded printable-ASCII prefix with the
//! same fragment patterns. The loader walks them in that order.

use std::panic::{catch_unwind, AssertUnwindSafe};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::{Confidence, TextSource};
use crate::resume::loader::{ExtractError, TextExtractor};

pub const TEXT_LAYER_MIN_USABLE: usize = 50;
pub const STREAM_SCAN_MIN_USABLE: usize = 50;
pub const RAW_SCAN_MIN_USABLE: usize = 10;

/// Per-pattern cap when harvesting fragments from undecoded bytes.
const MAX_MATCHES_PER_PATTERN: usize = 40;

pub const PDF_MAGIC: &[u8] = b"%PDF-";

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

static TJ_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(((?:[^()\\]|\\.)*)\)\s*Tj").unwrap());

static TJ_ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\s*TJ").unwrap());

static ARRAY_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(((?:[^()\\]|\\.)*)\)").unwrap());

static FRAGMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b[A-Z][a-z]+ [A-Z][a-z]+\b",
        r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b",
        r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        r"\b(?:19|20)\d{2}\b",
        r"(?i)\b(?:experience|education|skills|summary|projects?|developer|engineer|manager|analyst|consultant|architect)\b",
        r"(?i)\b(?:PHP|JavaScript|TypeScript|Python|Java|Rust|React|Angular|Vue|Node\.js|MySQL|PostgreSQL|Docker|Kubernetes|AWS|Linux|Git|HTML|CSS|Laravel|WordPress)\b",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Tiers
// ────────────────────────────────────────────────────────────────────────────

pub struct PdfTextLayer;

impl TextExtractor for PdfTextLayer {
    fn source(&self) -> TextSource {
        TextSource::PdfTextLayer
    }

    fn confidence(&self) -> Confidence {
        Confidence::High
    }

    fn min_usable_chars(&self) -> usize {
        TEXT_LAYER_MIN_USABLE
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if bytes.is_empty() {
            return Err(ExtractError::NoText);
        }
        // pdf-extract panics on some malformed cross-reference tables.
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
            Err(_) => Err(ExtractError::Panicked("pdf-extract")),
        }
    }
}

pub struct PdfStreamScan {
    pub limit_bytes: usize,
}

impl TextExtractor for PdfStreamScan {
    fn source(&self) -> TextSource {
        TextSource::PdfStreamScan
    }

    fn confidence(&self) -> Confidence {
        Confidence::Low
    }

    fn min_usable_chars(&self) -> usize {
        STREAM_SCAN_MIN_USABLE
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let window = &bytes[..bytes.len().min(self.limit_bytes)];
        let decoded = decode_latin1_printable(window);

        let operands = harvest_text_operands(&decoded);
        if usable(&operands) >= STREAM_SCAN_MIN_USABLE {
            return Ok(operands);
        }
        non_empty(harvest_fragments(&decoded))
    }
}

pub struct PdfRawScan {
    pub limit_bytes: usize,
}

impl TextExtractor for PdfRawScan {
    fn source(&self) -> TextSource {
        TextSource::PdfRawScan
    }

    fn confidence(&self) -> Confidence {
        Confidence::Low
    }

    fn min_usable_chars(&self) -> usize {
        RAW_SCAN_MIN_USABLE
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let window = &bytes[..bytes.len().min(self.limit_bytes)];
        let ascii: String = window
            .iter()
            .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { ' ' })
            .collect();
        non_empty(harvest_fragments(&ascii))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn has_pdf_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Latin-1 decode that keeps printable characters and turns every control
/// byte into a space.
fn decode_latin1_printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x20..=0x7e | 0xa0..=0xff => b as char,
            _ => ' ',
        })
        .collect()
}

/// Joins the string operands of `Tj` and `TJ` operators. Only uncompressed
/// content streams carry these in the clear.
fn harvest_text_operands(decoded: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for caps in TJ_LITERAL_RE.captures_iter(decoded) {
        if let Some(literal) = caps.get(1) {
            parts.push(unescape_literal(literal.as_str()));
        }
    }
    for caps in TJ_ARRAY_RE.captures_iter(decoded) {
        let Some(array) = caps.get(1) else { continue };
        let joined: String = ARRAY_LITERAL_RE
            .captures_iter(array.as_str())
            .filter_map(|c| c.get(1))
            .map(|m| unescape_literal(m.as_str()))
            .collect();
        parts.push(joined);
    }

    collapse_whitespace(&parts.join(" "))
}

fn unescape_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('r') | Some('t') => out.push(' '),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Runs each résumé fragment pattern over `text` and joins every match.
pub fn harvest_fragments(text: &str) -> String {
    let fragments: Vec<&str> = FRAGMENT_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).take(MAX_MATCHES_PER_PATTERN))
        .map(|m| m.as_str())
        .collect();
    collapse_whitespace(&fragments.join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

fn usable(text: &str) -> usize {
    crate::resume::normalize::usable_chars(text)
}

fn non_empty(text: String) -> Result<String, ExtractError> {
    if text.is_empty() {
        Err(ExtractError::NoText)
    } else {
        Ok(text)
    }
}
