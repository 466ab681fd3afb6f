//! Résumé parsing pipeline.
//!
//! load → normalize → segment → field extractors → synthesis. Every stage is a
//! pure function over the previous stage's output; the only shared state is
//! the process-wide pattern and dictionary tables.

pub mod contact;
pub mod docx;
pub mod experience;
pub mod fields;
pub mod handlers;
pub mod loader;
pub mod normalize;
pub mod pdf;
pub mod sanitize;
pub mod sections;
pub mod skills;
pub mod synthesis;

use tracing::{debug, info};

use crate::models::profile::{Confidence, Profile, Provenance};
use crate::resume::fields::FieldEntries;
use crate::resume::sections::{SectionKind, SectionMap};

pub use loader::{ExtractionConfig, RawDocument};
pub use sanitize::{sanitize_for_display, SanitizedText};

pub fn parse_resume(doc: &RawDocument, config: &ExtractionConfig) -> Profile {
    let loaded = loader::load(doc, config);
    let text = normalize::normalize(&loaded.text);
    let sections = sections::segment(&text);
    if sections.is_empty() {
        debug!("No section headings found, extractors will scan the full text");
    }

    let skills = skills::extract_skills(&text, &sections);
    let experience = experience::extract_experience(&text, &sections);
    let education = fields::extract_education(&text, &sections);
    let certifications = fields::extract_certifications(&text, &sections);
    let languages = fields::extract_languages(&text, &sections);
    let projects = fields::extract_projects(&text, &sections);
    let contact = contact::extract_contact(&text);

    let total_experience = synthesis::total_experience(
        &experience,
        sections.or_full_text(SectionKind::Experience, &text),
    );
    let real_entries = if experience.placeholder { 0 } else { experience.entries.len() };
    let career_level = synthesis::career_level(
        &seniority_text(&experience, &sections),
        skills.len(),
        real_entries,
    );
    let summary = synthesis::summarize(&skills, &experience, career_level);

    let placeholder_fields: Vec<String> = [
        ("experience", &experience),
        ("education", &education),
        ("languages", &languages),
    ]
    .iter()
    .filter(|(_, field)| field.placeholder)
    .map(|(name, _)| name.to_string())
    .collect();

    let confidence = match loaded.confidence {
        Confidence::Synthesized => Confidence::Synthesized,
        Confidence::High if placeholder_fields.is_empty() => Confidence::High,
        _ => Confidence::Low,
    };

    info!(
        source = ?loaded.source,
        ?confidence,
        sections = sections.len(),
        skills = skills.len(),
        experience = experience.entries.len(),
        ?career_level,
        total_experience,
        "Resume parsed"
    );

    Profile {
        skills,
        experience: experience.entries,
        education: education.entries,
        certifications,
        languages: languages.entries,
        projects,
        contact,
        summary,
        total_experience,
        career_level,
        extracted_text: text,
        provenance: Provenance {
            source: loaded.source,
            confidence,
            placeholder_fields,
        },
    }
}

/// Text scanned for seniority keywords: real experience entries plus the
/// experience and summary sections.
fn seniority_text(experience: &FieldEntries, sections: &SectionMap) -> String {
    let entries = experience
        .entries
        .iter()
        .filter(|_| !experience.placeholder)
        .map(String::as_str);
    let section_texts = [SectionKind::Experience, SectionKind::Summary]
        .into_iter()
        .filter_map(|kind| sections.get(kind));

    entries.chain(section_texts).collect::<Vec<_>>().join("\n")
}
