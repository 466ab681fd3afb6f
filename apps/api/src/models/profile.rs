use serde::{Deserialize, Serialize};

/// Coarse seniority classification derived from résumé text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerLevel {
    #[default]
    Entry,
    Mid,
    Senior,
    Executive,
}

impl CareerLevel {
    /// Human label used when templating the profile summary.
    pub fn label(&self) -> &'static str {
        match self {
            CareerLevel::Entry => "Entry-level professional",
            CareerLevel::Mid => "Mid-level professional",
            CareerLevel::Senior => "Senior professional",
            CareerLevel::Executive => "Executive leader",
        }
    }
}

/// Which extraction strategy produced the text the profile was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    PdfTextLayer,
    PdfStreamScan,
    PdfRawScan,
    Docx,
    PlainText,
    Synthesized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Low,
    Synthesized,
}

/// Lets callers tell a clean parse apart from one assembled out of fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub source: TextSource,
    pub confidence: Confidence,
    pub placeholder_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Structured result of the résumé pipeline. Built once per upload, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub projects: Vec<String>,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub summary: String,
    pub total_experience: u32,
    pub career_level: CareerLevel,
    pub extracted_text: String,
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_level_serializes_lowercase() {
        let json = serde_json::to_string(&CareerLevel::Executive).unwrap();
        assert_eq!(json, r#""executive""#);
        let level: CareerLevel = serde_json::from_str(r#""mid""#).unwrap();
        assert_eq!(level, CareerLevel::Mid);
    }

    #[test]
    fn test_profile_serializes_flat_camel_case() {
        let profile = Profile {
            skills: vec!["Rust".to_string()],
            experience: vec!["Engineer at Acme".to_string()],
            education: vec!["BSc Computer Science".to_string()],
            certifications: vec![],
            languages: vec!["English".to_string()],
            projects: vec![],
            contact: ContactInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
            summary: "Mid-level professional".to_string(),
            total_experience: 4,
            career_level: CareerLevel::Mid,
            extracted_text: "Jane Doe".to_string(),
            provenance: Provenance {
                source: TextSource::PlainText,
                confidence: Confidence::High,
                placeholder_fields: vec![],
            },
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["email"], "jane@example.com");
        assert!(value.get("phone").is_none());
        assert_eq!(value["totalExperience"], 4);
        assert_eq!(value["careerLevel"], "mid");
        assert_eq!(value["extractedText"], "Jane Doe");
        assert_eq!(value["provenance"]["source"], "plain_text");
        assert_eq!(value["provenance"]["confidence"], "high");
    }
}
