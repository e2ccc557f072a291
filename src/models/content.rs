//! Content entity DTOs and draft types.
//!
//! Each entity carries localized text in three languages (en/fr/es) as flat
//! fields, matching the wire shape of both backends. Legacy admin-UI alias
//! names (`liveLink`, `proficiency`, `content`, `grade`, ...) are accepted
//! on input through serde aliases and exposed as accessor methods, so an
//! alias can never diverge from its canonical field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill proficiency level. Stored lowercase; parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    /// Parse leniently: unknown or empty input falls back to `Intermediate`,
    /// the default the admin UI has always assumed.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl FromStr for ProficiencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(format!("Unknown proficiency level: {}", other)),
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Testimonial moderation status. Stored uppercase. The only transition is
/// `Pending -> Approved`, performed by the admin approve operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestimonialStatus {
    #[default]
    Pending,
    Approved,
}

impl TestimonialStatus {
    /// Parse leniently: anything that is not `APPROVED` is `Pending`.
    pub fn parse_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("approved") {
            Self::Approved
        } else {
            Self::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
        }
    }
}

/// Join a technology list into its stored comma-joined form.
pub fn join_technologies(list: &[String]) -> String {
    list.join(", ")
}

/// Split a stored technologies string back into a list. Empty segments are
/// dropped, so the split/join round trip is idempotent for comma-free
/// entries.
pub fn split_technologies(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<i64>,
    pub title_en: String,
    pub title_fr: String,
    pub title_es: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub technologies: Vec<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Project {
    /// Legacy admin-UI alias for `project_url`.
    pub fn live_link(&self) -> Option<&str> {
        self.project_url.as_deref()
    }

    /// Legacy admin-UI alias for `github_url`.
    pub fn github_link(&self) -> Option<&str> {
        self.github_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub title_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub technologies: Option<Vec<String>>,
    #[serde(alias = "liveLink")]
    pub project_url: Option<String>,
    #[serde(alias = "githubLink")]
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// =============================================================================
// Skill
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: Option<i64>,
    pub name_en: String,
    pub name_fr: String,
    pub name_es: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub proficiency_level: ProficiencyLevel,
    pub category: String,
    pub years_of_experience: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Skill {
    /// Legacy admin-UI alias for `proficiency_level`.
    pub fn proficiency(&self) -> ProficiencyLevel {
        self.proficiency_level
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillDraft {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    /// Accepts any casing; normalized to lowercase on storage.
    #[serde(alias = "proficiency")]
    pub proficiency_level: Option<String>,
    pub category: Option<String>,
    pub years_of_experience: Option<i32>,
}

// =============================================================================
// Education
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: Option<i64>,
    pub institution_name_en: String,
    pub institution_name_fr: String,
    pub institution_name_es: String,
    pub degree_en: String,
    pub degree_fr: String,
    pub degree_es: String,
    pub field_of_study_en: String,
    pub field_of_study_fr: String,
    pub field_of_study_es: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub gpa: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Education {
    /// Legacy admin-UI alias for `gpa`.
    pub fn grade(&self) -> Option<&str> {
        self.gpa.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationDraft {
    #[serde(alias = "institutionEn")]
    pub institution_name_en: Option<String>,
    #[serde(alias = "institutionFr")]
    pub institution_name_fr: Option<String>,
    #[serde(alias = "institutionEs")]
    pub institution_name_es: Option<String>,
    pub degree_en: Option<String>,
    pub degree_fr: Option<String>,
    pub degree_es: Option<String>,
    #[serde(alias = "fieldEn")]
    pub field_of_study_en: Option<String>,
    #[serde(alias = "fieldFr")]
    pub field_of_study_fr: Option<String>,
    #[serde(alias = "fieldEs")]
    pub field_of_study_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    #[serde(alias = "grade")]
    pub gpa: Option<String>,
}

// =============================================================================
// Experience
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: Option<i64>,
    pub company_name_en: String,
    pub company_name_fr: String,
    pub company_name_es: String,
    pub position_en: String,
    pub position_fr: String,
    pub position_es: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub location_en: Option<String>,
    pub location_fr: Option<String>,
    pub location_es: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub skills_used: Option<String>,
    pub icon: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Experience {
    /// Legacy admin-UI alias: the first available localized location.
    pub fn location(&self) -> Option<&str> {
        self.location_en
            .as_deref()
            .or(self.location_fr.as_deref())
            .or(self.location_es.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceDraft {
    #[serde(alias = "companyEn")]
    pub company_name_en: Option<String>,
    #[serde(alias = "companyFr")]
    pub company_name_fr: Option<String>,
    #[serde(alias = "companyEs")]
    pub company_name_es: Option<String>,
    pub position_en: Option<String>,
    pub position_fr: Option<String>,
    pub position_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub location_en: Option<String>,
    pub location_fr: Option<String>,
    pub location_es: Option<String>,
    /// Single-location fallback used by the legacy admin form; applied to
    /// any localized location left unset.
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    pub skills_used: Option<String>,
    pub icon: Option<String>,
}

// =============================================================================
// Hobby
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hobby {
    pub id: Option<i64>,
    pub name_en: String,
    pub name_fr: String,
    pub name_es: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub icon: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HobbyDraft {
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub icon: Option<String>,
}

// =============================================================================
// Testimonial
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub id: Option<i64>,
    pub client_name: String,
    pub client_position: String,
    pub client_company: String,
    pub testimonial_text_en: String,
    pub testimonial_text_fr: String,
    pub testimonial_text_es: String,
    pub rating: i32,
    pub client_image_url: Option<String>,
    pub status: TestimonialStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Testimonial {
    /// Derived view of `status == APPROVED`.
    pub fn approved(&self) -> bool {
        self.status == TestimonialStatus::Approved
    }

    /// Legacy admin-UI alias for the English testimonial text.
    pub fn content(&self) -> &str {
        &self.testimonial_text_en
    }
}

/// Public testimonial submission. Status is not settable here: submissions
/// always enter as `PENDING`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialDraft {
    pub client_name: Option<String>,
    pub client_position: Option<String>,
    pub client_company: Option<String>,
    pub testimonial_text_en: Option<String>,
    pub testimonial_text_fr: Option<String>,
    pub testimonial_text_es: Option<String>,
    pub rating: Option<i32>,
    pub client_image_url: Option<String>,
}

// =============================================================================
// Message
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Message {
    /// Legacy admin-UI alias for the message body.
    pub fn content(&self) -> &str {
        &self.message
    }

    /// Legacy admin-UI alias for `created_at`.
    pub fn date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// Contact form submission, including the hidden honeypot field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageDraft {
    #[serde(alias = "name")]
    pub sender_name: String,
    #[serde(alias = "email")]
    pub sender_email: String,
    pub subject: String,
    #[serde(alias = "content")]
    pub message: String,
    /// Honeypot. Humans never see this field; any non-empty value marks the
    /// submission as automated spam and it is silently dropped.
    pub website: Option<String>,
}

impl MessageDraft {
    pub fn is_spam(&self) -> bool {
        self.website
            .as_deref()
            .map(|w| !w.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Outcome of a contact form submission. Honeypot-dropped submissions
/// report success with no stored id, indistinguishable from the outside.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageReceipt {
    pub id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proficiency_parses_case_insensitively() {
        assert_eq!(ProficiencyLevel::parse_lossy("Expert"), ProficiencyLevel::Expert);
        assert_eq!(ProficiencyLevel::parse_lossy("EXPERT"), ProficiencyLevel::Expert);
        assert_eq!(
            ProficiencyLevel::parse_lossy("beginner"),
            ProficiencyLevel::Beginner
        );
    }

    #[test]
    fn proficiency_unknown_falls_back_to_intermediate() {
        assert_eq!(
            ProficiencyLevel::parse_lossy("wizard"),
            ProficiencyLevel::Intermediate
        );
        assert_eq!(ProficiencyLevel::parse_lossy(""), ProficiencyLevel::Intermediate);
    }

    #[test]
    fn testimonial_status_lossy_parse() {
        assert_eq!(
            TestimonialStatus::parse_lossy("approved"),
            TestimonialStatus::Approved
        );
        assert_eq!(
            TestimonialStatus::parse_lossy("PENDING"),
            TestimonialStatus::Pending
        );
        assert_eq!(TestimonialStatus::parse_lossy(""), TestimonialStatus::Pending);
    }

    #[test]
    fn technologies_round_trip() {
        let list = vec!["Rust".to_string(), "React".to_string(), "Postgres".to_string()];
        let joined = join_technologies(&list);
        assert_eq!(joined, "Rust, React, Postgres");
        assert_eq!(split_technologies(&joined), list);
    }

    #[test]
    fn technologies_split_drops_empty_segments() {
        assert_eq!(
            split_technologies(" Rust ,, React ,"),
            vec!["Rust".to_string(), "React".to_string()]
        );
        assert!(split_technologies("").is_empty());
    }

    #[test]
    fn draft_accepts_legacy_aliases() {
        let draft: ProjectDraft = serde_json::from_str(
            r#"{"titleEn":"Site","liveLink":"https://example.com","githubLink":"https://github.com/x"}"#,
        )
        .unwrap();
        assert_eq!(draft.project_url.as_deref(), Some("https://example.com"));
        assert_eq!(draft.github_url.as_deref(), Some("https://github.com/x"));
    }

    #[test]
    fn honeypot_detection() {
        let mut draft = MessageDraft {
            sender_name: "John Doe".into(),
            sender_email: "john@example.com".into(),
            subject: "Hello".into(),
            message: "A real message".into(),
            website: None,
        };
        assert!(!draft.is_spam());
        draft.website = Some("   ".into());
        assert!(!draft.is_spam());
        draft.website = Some("http://spam.example".into());
        assert!(draft.is_spam());
    }
}
