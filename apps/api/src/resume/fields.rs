//! Education, certification, language and project extractors.
//!
//! Each works on its own section when the segmenter found one and falls back
//! to the whole document otherwise.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::sections::{is_heading_line, SectionKind, SectionMap};

pub const MAX_EDUCATION_ENTRIES: usize = 3;
pub const MAX_CERTIFICATIONS: usize = 10;
pub const MAX_PROJECTS: usize = 10;
const MAX_ENTRY_CHARS: usize = 120;
const MAX_PROJECT_CHARS: usize = 100;

pub const EDUCATION_PLACEHOLDER: &str = "Educational background information detected";
pub const DEFAULT_LANGUAGE: &str = "English";

const COMMON_LANGUAGES: &[&str] = &[
    "English", "Spanish", "French", "German", "Chinese", "Mandarin", "Japanese", "Korean",
    "Portuguese", "Russian", "Arabic", "Hindi", "Italian", "Dutch",
];

/// Extracted list plus whether it is the guaranteed fallback rather than real text.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntries {
    pub entries: Vec<String>,
    pub placeholder: bool,
}

impl FieldEntries {
    pub fn found(entries: Vec<String>) -> Self {
        Self {
            entries,
            placeholder: false,
        }
    }

    /// Uses `fallback` when nothing was found so the list is never empty.
    pub fn or_placeholder(entries: Vec<String>, fallback: &str) -> Self {
        if entries.is_empty() {
            Self {
                entries: vec![fallback.to_string()],
                placeholder: true,
            }
        } else {
            Self::found(entries)
        }
    }
}

/// Appends `candidate` unless the same entry (ignoring case and surrounding
/// whitespace) is already present.
pub(crate) fn push_unique(entries: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return;
    }
    let folded = candidate.to_lowercase();
    if entries.iter().any(|e| e.to_lowercase() == folded) {
        return;
    }
    entries.push(candidate.to_string());
}

/// Whether `span` overlaps any span already taken from the same text.
fn overlaps_taken(taken: &[Range<usize>], span: &Range<usize>) -> bool {
    taken.iter().any(|t| span.start < t.end && t.start < span.end)
}

/// Cuts `text` to at most `max` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?i:\b(?:bachelor|master|doctorate|associate|diploma|certificate)(?:'s|s)?\b)|\b(?:Ph\.?D|MBA|B\.?Sc|M\.?Sc|B\.S|M\.S|B\.A|B\.?Tech|M\.?Tech|BS in|MS in)\b)",
    )
    .unwrap()
});

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+[A-Z]").unwrap());

static INSTITUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:university|college|institute|school|academy)\b").unwrap());

pub fn extract_education(full_text: &str, sections: &SectionMap) -> FieldEntries {
    let text = sections.or_full_text(SectionKind::Education, full_text);
    let mut entries = Vec::new();

    for line in text.lines() {
        // "Master of Science (M.Sc)" is one entry, not two.
        let mut covered_until = 0;
        for degree in DEGREE_RE.find_iter(line) {
            if degree.start() < covered_until {
                continue;
            }
            let rest = &line[degree.end()..];
            let end = SENTENCE_END_RE
                .find(rest)
                .map(|m| m.start())
                .unwrap_or(rest.len());
            let entry = &line[degree.start()..degree.end() + end];
            let entry = truncate_chars(entry.trim(), MAX_ENTRY_CHARS).trim();
            if entry.chars().count() >= 6 {
                push_unique(&mut entries, entry);
                covered_until = degree.end() + end;
            }
        }
    }

    if entries.is_empty() {
        for line in text.lines().map(str::trim) {
            if INSTITUTION_RE.is_match(line) && !is_heading_line(line) {
                push_unique(&mut entries, truncate_chars(line, MAX_ENTRY_CHARS));
            }
        }
    }

    entries.truncate(MAX_EDUCATION_ENTRIES);
    FieldEntries::or_placeholder(entries, EDUCATION_PLACEHOLDER)
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

static CERTIFICATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:AWS|Amazon Web Services)\b[^,\n]*\bCertified\b[^\n]*",
        r"(?i)\bMicrosoft Certified\b[^\n]*",
        r"(?i)\bAzure\b[^,\n]*\bCertified\b[^\n]*",
        r"(?i)\bGoogle Cloud\b[^,\n]*\bCertified\b[^\n]*",
        r"(?i)\bCertified\b[^\n]*?\b(?:Scrum|Kubernetes|Docker)\b[^\n]*",
        r"\b(?:PMP|CISSP|CISM|CISA|CCNA|CCNP|CKA|CKAD)\b[^\n]*",
        r"(?i)\bCompTIA\b[^\n]*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Provider-pattern certifications. An empty list is a valid result.
pub fn extract_certifications(full_text: &str, sections: &SectionMap) -> Vec<String> {
    let text = sections.or_full_text(SectionKind::Certifications, full_text);
    let mut certifications = Vec::new();
    // Provider patterns overlap ("Certified Kubernetes Administrator (CKA)"
    // hits two of them); a span already taken is not read again.
    let mut taken: Vec<Range<usize>> = Vec::new();

    for pattern in CERTIFICATION_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            if overlaps_taken(&taken, &found.range()) {
                continue;
            }
            let cert = found.as_str().trim().trim_end_matches([',', ';']);
            if cert.chars().count() > 5 {
                push_unique(&mut certifications, cert);
                taken.push(found.range());
            }
        }
    }

    certifications.truncate(MAX_CERTIFICATIONS);
    certifications
}

// ────────────────────────────────────────────────────────────────────────────
// Languages
// ────────────────────────────────────────────────────────────────────────────

static LANGUAGE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    COMMON_LANGUAGES
        .iter()
        .map(|lang| (*lang, Regex::new(&format!(r"(?i)\b{lang}\b")).unwrap()))
        .collect()
});

/// Human languages from a fixed checklist; defaults to English.
pub fn extract_languages(full_text: &str, sections: &SectionMap) -> FieldEntries {
    let text = sections.or_full_text(SectionKind::Languages, full_text);
    let languages = LANGUAGE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(lang, _)| lang.to_string())
        .collect();
    FieldEntries::or_placeholder(languages, DEFAULT_LANGUAGE)
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

static PROJECT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:[-•*▪][ \t]*)?(?:Project|Portfolio|Developed|Built|Created)\b[ \t]*:?[ \t]*(.+)$",
    )
    .unwrap()
});

static BULLET_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*▪][ \t]*").unwrap());

pub fn extract_projects(full_text: &str, sections: &SectionMap) -> Vec<String> {
    let section = sections.get(SectionKind::Projects);
    let text = section.unwrap_or(full_text);
    let mut projects = Vec::new();

    for caps in PROJECT_LINE_RE.captures_iter(text) {
        let project = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        if project.chars().count() >= 10 {
            push_unique(&mut projects, truncate_chars(project, MAX_PROJECT_CHARS));
        }
    }

    // A projects section without prefixed lines lists one project per line.
    if projects.is_empty() {
        if let Some(section) = section {
            for line in section.lines() {
                let line = BULLET_PREFIX_RE.replace(line.trim(), "");
                if line.chars().count() >= 10 {
                    push_unique(&mut projects, truncate_chars(&line, MAX_PROJECT_CHARS));
                }
            }
        }
    }

    projects.truncate(MAX_PROJECTS);
    projects
}
