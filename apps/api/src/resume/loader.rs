//! Document loader: raw upload bytes in, best-effort text out.
//!
//! `load` never fails. Each document kind has an ordered chain of
//! [`TextExtractor`]s; the first one that yields enough usable characters
//! wins. When the chain is exhausted the loader synthesizes a résumé-shaped
//! block derived from the filename so downstream extractors still have signal.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::profile::{Confidence, TextSource};
use crate::resume::docx::DocxText;
use crate::resume::normalize::usable_chars;
use crate::resume::pdf::{has_pdf_magic, PdfRawScan, PdfStreamScan, PdfTextLayer};

/// Plain text shorter than this is treated as unreadable.
pub const PLAIN_TEXT_MIN_USABLE: usize = 10;
/// A failed Word parse is rescued as text only above this.
pub const MISLABELED_TEXT_MIN_USABLE: usize = 50;

pub const DEFAULT_RAW_SCAN_LIMIT_BYTES: usize = 50_000;
pub const DEFAULT_STREAM_SCAN_LIMIT_BYTES: usize = 5 * 1024 * 1024;

pub const FALLBACK_CANDIDATE_NAME: &str = "Professional Candidate";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF text layer unreadable: {0}")]
    Pdf(String),

    #[error("Word document unreadable: {0}")]
    Docx(String),

    #[error("{0} panicked while reading the document")]
    Panicked(&'static str),

    #[error("no text recovered")]
    NoText,
}

/// One strategy for turning bytes into text.
pub trait TextExtractor {
    fn source(&self) -> TextSource;
    fn confidence(&self) -> Confidence;
    /// Minimum alphanumeric count for the result to be accepted.
    fn min_usable_chars(&self) -> usize;
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub content_type: String,
    pub filename: String,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    pub fn detect(doc: &RawDocument) -> Self {
        let content_type = doc.content_type.to_ascii_lowercase();
        let filename = doc.filename.to_ascii_lowercase();

        if content_type == "application/pdf"
            || filename.ends_with(".pdf")
            || has_pdf_magic(&doc.bytes)
        {
            return DocumentKind::Pdf;
        }
        if ["word", "msword", "officedocument"]
            .iter()
            .any(|marker| content_type.contains(marker))
            || filename.ends_with(".docx")
            || filename.ends_with(".doc")
        {
            return DocumentKind::Word;
        }
        DocumentKind::PlainText
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractionConfig {
    pub raw_scan_limit_bytes: usize,
    pub stream_scan_limit_bytes: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            raw_scan_limit_bytes: DEFAULT_RAW_SCAN_LIMIT_BYTES,
            stream_scan_limit_bytes: DEFAULT_STREAM_SCAN_LIMIT_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedText {
    pub text: String,
    pub source: TextSource,
    pub confidence: Confidence,
}

// ────────────────────────────────────────────────────────────────────────────
// Loading
// ────────────────────────────────────────────────────────────────────────────

pub fn load(doc: &RawDocument, config: &ExtractionConfig) -> LoadedText {
    let kind = DocumentKind::detect(doc);
    debug!(
        filename = %doc.filename,
        content_type = %doc.content_type,
        bytes = doc.bytes.len(),
        ?kind,
        "Loading document"
    );

    let loaded = match kind {
        DocumentKind::Pdf => run_chain(&pdf_chain(config), &doc.bytes),
        DocumentKind::Word => run_chain(&[Box::new(DocxText) as Box<dyn TextExtractor>], &doc.bytes)
            .or_else(|| mislabeled_text(&doc.bytes)),
        DocumentKind::PlainText => plain_text(&doc.bytes),
    };

    let loaded = loaded.unwrap_or_else(|| {
        info!(filename = %doc.filename, ?kind, "No usable text recovered, synthesizing fallback");
        LoadedText {
            text: synthesize_fallback(&doc.filename),
            source: TextSource::Synthesized,
            confidence: Confidence::Synthesized,
        }
    });

    info!(
        source = ?loaded.source,
        chars = loaded.text.len(),
        "Document loaded"
    );
    loaded
}

fn pdf_chain(config: &ExtractionConfig) -> Vec<Box<dyn TextExtractor>> {
    vec![
        Box::new(PdfTextLayer),
        Box::new(PdfStreamScan {
            limit_bytes: config.stream_scan_limit_bytes,
        }),
        Box::new(PdfRawScan {
            limit_bytes: config.raw_scan_limit_bytes,
        }),
    ]
}

fn run_chain(chain: &[Box<dyn TextExtractor>], bytes: &[u8]) -> Option<LoadedText> {
    for extractor in chain {
        let source = extractor.source();
        match extractor.extract(bytes) {
            Ok(text) => {
                let usable = usable_chars(&text);
                if usable >= extractor.min_usable_chars() {
                    debug!(?source, usable, "Extraction tier accepted");
                    return Some(LoadedText {
                        text,
                        source,
                        confidence: extractor.confidence(),
                    });
                }
                debug!(
                    ?source,
                    usable,
                    required = extractor.min_usable_chars(),
                    "Extraction tier yielded too little text"
                );
            }
            Err(e) => warn!(?source, error = %e, "Extraction tier failed"),
        }
    }
    None
}

/// Word uploads that are really text files.
fn mislabeled_text(bytes: &[u8]) -> Option<LoadedText> {
    let text = std::str::from_utf8(bytes).ok()?;
    if usable_chars(text) < MISLABELED_TEXT_MIN_USABLE {
        return None;
    }
    debug!("Word parse failed, using bytes as UTF-8 text");
    Some(LoadedText {
        text: text.to_string(),
        source: TextSource::PlainText,
        confidence: Confidence::Low,
    })
}

fn plain_text(bytes: &[u8]) -> Option<LoadedText> {
    let text = String::from_utf8_lossy(bytes).into_owned();
    if usable_chars(&text) < PLAIN_TEXT_MIN_USABLE {
        return None;
    }
    Some(LoadedText {
        text,
        source: TextSource::PlainText,
        confidence: Confidence::High,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Synthesized fallback
// ────────────────────────────────────────────────────────────────────────────

/// "jane_doe-resume.pdf" → "Jane Doe".
pub fn candidate_name_from_filename(filename: &str) -> String {
    let base = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(filename);
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };

    let words: Vec<String> = stem
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .filter(|w| !matches!(w.to_ascii_lowercase().as_str(), "resume" | "cv"))
        .map(title_case)
        .collect();

    if words.is_empty() {
        FALLBACK_CANDIDATE_NAME.to_string()
    } else {
        words.join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn synthesize_fallback(filename: &str) -> String {
    let name = candidate_name_from_filename(filename);
    format!(
        "{name}\n\
         Summary:\n\
         Experienced software professional with a background in web application development.\n\
         Skills:\n\
         JavaScript, HTML, CSS, SQL, Git, Problem Solving, Team Collaboration\n\
         Experience:\n\
         Software Developer with hands-on project delivery across the full development lifecycle.\n\
         Education:\n\
         Bachelor of Science in Computer Science\n\
         Contact:\n\
         Contact details available on request.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(bytes: &[u8], content_type: &str, filename: &str) -> RawDocument {
        RawDocument::new(bytes.to_vec(), content_type, filename)
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(DocumentKind::detect(&doc(b"", "application/pdf", "x")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::detect(&doc(b"", "", "CV.PDF")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::detect(&doc(b"%PDF-1.4", "text/plain", "x.txt")), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::detect(&doc(
                b"",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "x"
            )),
            DocumentKind::Word
        );
        assert_eq!(DocumentKind::detect(&doc(b"", "", "cv.doc")), DocumentKind::Word);
        assert_eq!(DocumentKind::detect(&doc(b"hi", "text/plain", "cv.txt")), DocumentKind::PlainText);
    }

    #[test]
    fn test_zero_byte_pdf_synthesizes_with_name() {
        let loaded = load(&doc(b"", "application/pdf", "jane_doe_resume.pdf"), &ExtractionConfig::default());
        assert_eq!(loaded.source, TextSource::Synthesized);
        assert_eq!(loaded.confidence, Confidence::Synthesized);
        assert!(loaded.text.starts_with("Jane Doe\n"));
    }

    #[test]
    fn test_garbage_pdf_never_fails() {
        let mut noise: Vec<u8> = b"%PDF-1.7\n".to_vec();
        noise.extend((0..4096u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8));
        let loaded = load(&doc(&noise, "application/pdf", "scan.pdf"), &ExtractionConfig::default());
        assert!(!loaded.text.trim().is_empty());
    }

    #[test]
    fn test_random_noise_any_type_never_fails() {
        let noise: Vec<u8> = (0..512u32).map(|i| (i * 97 % 251) as u8).collect();
        for (ct, name) in [("application/pdf", "a.pdf"), ("application/msword", "a.doc"), ("", "a.bin")] {
            let loaded = load(&doc(&noise, ct, name), &ExtractionConfig::default());
            assert!(usable_chars(&loaded.text) >= PLAIN_TEXT_MIN_USABLE);
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        let loaded = load(
            &doc(b"Jane Doe\nSKILLS\nRust, Go", "text/plain", "cv.txt"),
            &ExtractionConfig::default(),
        );
        assert_eq!(loaded.source, TextSource::PlainText);
        assert_eq!(loaded.confidence, Confidence::High);
        assert!(loaded.text.contains("Rust, Go"));
    }

    #[test]
    fn test_short_plain_text_synthesizes() {
        let loaded = load(&doc(b"hi", "text/plain", "notes.txt"), &ExtractionConfig::default());
        assert_eq!(loaded.source, TextSource::Synthesized);
        assert!(loaded.text.starts_with("Notes\n"));
    }

    #[test]
    fn test_mislabeled_word_file_is_rescued_as_text() {
        let body = b"John Smith\nExperience: Senior Backend Engineer at Initech building payment services";
        let loaded = load(&doc(body, "application/msword", "john.doc"), &ExtractionConfig::default());
        assert_eq!(loaded.source, TextSource::PlainText);
        assert_eq!(loaded.confidence, Confidence::Low);
        assert!(loaded.text.contains("Initech"));
    }

    #[test]
    fn test_candidate_name_from_filename() {
        assert_eq!(candidate_name_from_filename("jane_doe_resume.pdf"), "Jane Doe");
        assert_eq!(candidate_name_from_filename("CV-MARIA-lopez.docx"), "Maria Lopez");
        assert_eq!(candidate_name_from_filename("uploads/bob.pdf"), "Bob");
        assert_eq!(candidate_name_from_filename("resume.pdf"), FALLBACK_CANDIDATE_NAME);
        assert_eq!(candidate_name_from_filename(""), FALLBACK_CANDIDATE_NAME);
    }

    #[test]
    fn test_fallback_has_section_headings() {
        let text = synthesize_fallback("x.pdf");
        for heading in ["Summary:", "Skills:", "Experience:", "Education:", "Contact:"] {
            assert!(text.contains(heading), "missing {heading}");
        }
    }
}
