//! Derived profile fields: years of experience, career level, summary prose.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::CareerLevel;
use crate::resume::fields::FieldEntries;

pub const MAX_TOTAL_EXPERIENCE_YEARS: u32 = 40;
/// Used when the experience list is only the placeholder entry.
pub const DEFAULT_EXPERIENCE_YEARS: u32 = 3;
pub const YEARS_PER_ENTRY: u32 = 2;

pub const SENIOR_SKILL_THRESHOLD: usize = 15;
pub const SENIOR_ENTRY_THRESHOLD: usize = 3;
pub const MID_SKILL_THRESHOLD: usize = 8;
pub const MID_ENTRY_THRESHOLD: usize = 2;

const SUMMARY_TOP_SKILLS: usize = 3;

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\b").unwrap());

static EXECUTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:chief|director|vp|vice president|head of|cto|ceo|cio)\b").unwrap()
});
static SENIOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:senior|sr\.?|lead|principal|staff)\b").unwrap());
static MID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:mid-level|mid level|intermediate)\b").unwrap());
static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:junior|jr\.?|entry|associate|intern|internship|trainee|graduate)\b")
        .unwrap()
});

/// Largest explicit "N years" mention across `texts`, bounded to
/// [0, MAX_TOTAL_EXPERIENCE_YEARS].
pub fn max_explicit_years<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<u32> {
    texts
        .into_iter()
        .flat_map(|text| YEARS_RE.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|years| *years > 0)
        .max()
        .map(|years| years.min(MAX_TOTAL_EXPERIENCE_YEARS))
}

/// Max of explicit mentions; otherwise two years per real entry, or the
/// default when the list is only the placeholder.
pub fn total_experience(experience: &FieldEntries, experience_text: &str) -> u32 {
    let texts = experience
        .entries
        .iter()
        .filter(|_| !experience.placeholder)
        .map(String::as_str)
        .chain(std::iter::once(experience_text));

    if let Some(years) = max_explicit_years(texts) {
        return years;
    }
    if experience.placeholder {
        return DEFAULT_EXPERIENCE_YEARS;
    }
    (experience.entries.len() as u32 * YEARS_PER_ENTRY).min(MAX_TOTAL_EXPERIENCE_YEARS)
}

/// Seniority keywords win (executive over senior over mid over entry);
/// otherwise the skill and entry counts decide.
pub fn career_level(seniority_text: &str, skill_count: usize, entry_count: usize) -> CareerLevel {
    if EXECUTIVE_RE.is_match(seniority_text) {
        return CareerLevel::Executive;
    }
    if SENIOR_RE.is_match(seniority_text) {
        return CareerLevel::Senior;
    }
    if MID_RE.is_match(seniority_text) {
        return CareerLevel::Mid;
    }
    if ENTRY_RE.is_match(seniority_text) {
        return CareerLevel::Entry;
    }

    if skill_count >= SENIOR_SKILL_THRESHOLD || entry_count >= SENIOR_ENTRY_THRESHOLD {
        CareerLevel::Senior
    } else if skill_count >= MID_SKILL_THRESHOLD || entry_count >= MID_ENTRY_THRESHOLD {
        CareerLevel::Mid
    } else {
        CareerLevel::Entry
    }
}

pub fn summarize(skills: &[String], experience: &FieldEntries, level: CareerLevel) -> String {
    let top_skills = if skills.is_empty() {
        "various technologies".to_string()
    } else {
        skills
            .iter()
            .take(SUMMARY_TOP_SKILLS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let experience_clause = if experience.placeholder {
        "Seeking new opportunities to apply these skills.".to_string()
    } else {
        match experience.entries.len() {
            1 => "Relevant experience in 1 key role.".to_string(),
            n => format!("Relevant experience across {n} key roles."),
        }
    };

    format!(
        "{} with expertise in {top_skills}. {experience_clause}",
        level.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(items: &[&str]) -> FieldEntries {
        FieldEntries::found(items.iter().map(|s| s.to_string()).collect())
    }

    fn placeholder() -> FieldEntries {
        FieldEntries::or_placeholder(vec![], "placeholder")
    }

    #[test]
    fn test_max_of_explicit_mentions() {
        let exp = entries(&["Engineer at A for 3 years", "Lead at B, 7 yrs"]);
        assert_eq!(total_experience(&exp, ""), 7);
    }

    #[test]
    fn test_experience_text_mentions_count() {
        assert_eq!(total_experience(&placeholder(), "5 years experience"), 5);
        assert_eq!(total_experience(&placeholder(), "10+ years of Rust"), 10);
    }

    #[test]
    fn test_mentions_are_bounded() {
        assert_eq!(
            total_experience(&placeholder(), "99 years of wisdom"),
            MAX_TOTAL_EXPERIENCE_YEARS
        );
    }

    #[test]
    fn test_entry_count_fallback() {
        let exp = entries(&["Engineer at A", "Developer at B"]);
        assert_eq!(total_experience(&exp, "no numbers"), 4);
    }

    #[test]
    fn test_placeholder_floor() {
        assert_eq!(total_experience(&placeholder(), ""), DEFAULT_EXPERIENCE_YEARS);
    }

    #[test]
    fn test_keyword_precedence() {
        assert_eq!(career_level("Senior Software Architect", 0, 0), CareerLevel::Senior);
        assert_eq!(career_level("Senior Director of Engineering", 0, 0), CareerLevel::Executive);
        assert_eq!(career_level("Junior developer", 40, 5), CareerLevel::Entry);
        assert_eq!(career_level("Intermediate analyst", 0, 0), CareerLevel::Mid);
    }

    #[test]
    fn test_keywords_respect_word_boundaries() {
        // "leadership" is not "lead", "reentry" is not "entry".
        assert_eq!(career_level("leadership reentry", 0, 0), CareerLevel::Entry);
        assert_eq!(career_level("leadership", 8, 0), CareerLevel::Mid);
    }

    #[test]
    fn test_count_thresholds() {
        assert_eq!(career_level("", 15, 0), CareerLevel::Senior);
        assert_eq!(career_level("", 0, 3), CareerLevel::Senior);
        assert_eq!(career_level("", 8, 0), CareerLevel::Mid);
        assert_eq!(career_level("", 0, 2), CareerLevel::Mid);
        assert_eq!(career_level("", 7, 1), CareerLevel::Entry);
    }

    #[test]
    fn test_summary_uses_top_skills_and_level() {
        let skills = vec!["Rust".to_string(), "Go".to_string(), "SQL".to_string(), "Git".to_string()];
        let summary = summarize(&skills, &entries(&["a", "b"]), CareerLevel::Senior);
        assert_eq!(
            summary,
            "Senior professional with expertise in Rust, Go, SQL. Relevant experience across 2 key roles."
        );
    }

    #[test]
    fn test_summary_never_empty() {
        let summary = summarize(&[], &placeholder(), CareerLevel::Entry);
        assert!(summary.contains("various technologies"));
    }
}
