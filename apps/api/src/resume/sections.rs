//! Heading-based section segmentation.
//!
//! A heading is a line consisting of one known synonym (case-insensitive),
//! optionally followed by a colon and inline content. Each section runs until
//! the next recognised heading of any kind. When a section's heading appears
//! more than once, the first occurrence wins.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Languages,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Projects,
        SectionKind::Languages,
    ];

    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &[
                "SUMMARY",
                "PROFESSIONAL SUMMARY",
                "OBJECTIVE",
                "CAREER OBJECTIVE",
                "PROFILE",
                "ABOUT",
                "ABOUT ME",
            ],
            SectionKind::Experience => &[
                "EXPERIENCE",
                "WORK EXPERIENCE",
                "PROFESSIONAL EXPERIENCE",
                "EMPLOYMENT",
                "EMPLOYMENT HISTORY",
                "WORK HISTORY",
            ],
            SectionKind::Education => &[
                "EDUCATION",
                "ACADEMIC BACKGROUND",
                "ACADEMIC",
                "QUALIFICATIONS",
            ],
            SectionKind::Skills => &[
                "SKILLS",
                "TECHNICAL SKILLS",
                "CORE COMPETENCIES",
                "COMPETENCIES",
            ],
            SectionKind::Certifications => &[
                "CERTIFICATIONS",
                "CERTIFICATION",
                "LICENSES & CERTIFICATIONS",
                "LICENSES",
                "AWARDS",
            ],
            SectionKind::Projects => &["PROJECTS", "KEY PROJECTS", "PORTFOLIO"],
            SectionKind::Languages => &["LANGUAGES", "LANGUAGE SKILLS", "LANGUAGE PROFICIENCY"],
        }
    }
}

/// Builds the heading-line pattern for a set of synonyms. Longer synonyms go
/// first so `WORK EXPERIENCE` is never read as a bare `EXPERIENCE`.
pub fn heading_pattern(synonyms: &[&str]) -> Result<Regex, regex::Error> {
    let mut sorted: Vec<&str> = synonyms.to_vec();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let alternation = sorted
        .iter()
        .map(|s| regex::escape(s).replace(' ', r"[ \t]+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:{alternation})[ \t]*(?::[ \t]*|$)"
    ))
}

/// Per-section heading regexes, compiled once. A pattern that fails to compile
/// is logged and its section is never detected.
static SECTION_HEADINGS: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    SectionKind::ALL
        .iter()
        .filter_map(|kind| match heading_pattern(kind.synonyms()) {
            Ok(re) => Some((*kind, re)),
            Err(e) => {
                warn!("Heading pattern for {kind:?} failed to compile, skipping: {e}");
                None
            }
        })
        .collect()
});

/// Matches any known heading; marks where the current section ends.
static ANY_HEADING: Lazy<Option<Regex>> = Lazy::new(|| {
    let all: Vec<&str> = SectionKind::ALL
        .iter()
        .flat_map(|k| k.synonyms().iter().copied())
        .collect();
    match heading_pattern(&all) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Combined heading pattern failed to compile: {e}");
            None
        }
    }
});

/// Section name → body text. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    sections: HashMap<SectionKind, String>,
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.sections.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section body when present, otherwise the whole document.
    pub fn or_full_text<'a>(&'a self, kind: SectionKind, full_text: &'a str) -> &'a str {
        self.get(kind).unwrap_or(full_text)
    }
}

/// Splits normalized text into named sections. Missing headings are not errors.
pub fn segment(text: &str) -> SectionMap {
    let mut sections = HashMap::new();

    for (kind, heading) in SECTION_HEADINGS.iter() {
        let Some(found) = heading.find(text) else {
            continue;
        };
        let rest = &text[found.end()..];
        let end = next_heading_start(rest).unwrap_or(rest.len());
        let body = rest[..end].trim();
        if !body.is_empty() {
            sections.insert(*kind, body.to_string());
        }
    }

    SectionMap { sections }
}

/// Whether a single line reads as a section heading.
pub fn is_heading_line(line: &str) -> bool {
    ANY_HEADING
        .as_ref()
        .is_some_and(|re| re.is_match(line.trim()))
}

fn next_heading_start(rest: &str) -> Option<usize> {
    let any = ANY_HEADING.as_ref()?;
    // The match at offset 0 is inline content on the heading's own line.
    any.find_iter(rest)
        .map(|m| m.start())
        .find(|&start| start > 0 && rest[..start].contains('\n'))
}
