//! Storage rows and Row/DTO mappers for the direct backend.
//!
//! Rows carry the snake_case column shape of the database tables; the
//! mappers translate them to and from the camelCase DTOs. Mapping is total
//! for known columns and pure: missing required text becomes an empty
//! string, missing optional text `None`, flags default `false`, rating
//! defaults to 5, and timestamps normalize to RFC 3339 or `None` without
//! ever failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    join_technologies, split_technologies, Education, EducationDraft, Experience,
    ExperienceDraft, Hobby, HobbyDraft, Message, MessageDraft, ProficiencyLevel, Project,
    ProjectDraft, Skill, SkillDraft, Testimonial, TestimonialDraft, TestimonialStatus,
};

/// Normalize a raw timestamp value to RFC 3339 with millisecond precision.
///
/// Accepts RFC 3339 strings, SQL-style datetimes (with or without zone
/// suffix), bare dates, and unix epochs in seconds or milliseconds.
/// Anything unparseable maps to `None`, never an error.
pub fn to_iso(value: Option<&Value>) -> Option<String> {
    let format = |dt: DateTime<Utc>| dt.to_rfc3339_opts(SecondsFormat::Millis, true);

    match value? {
        Value::String(s) => parse_timestamp_str(s).map(format),
        Value::Number(n) => {
            let millis = if let Some(i) = n.as_i64() {
                // Heuristic shared with the old frontend: values this large
                // can only be milliseconds.
                if i.abs() >= 100_000_000_000 {
                    i
                } else {
                    i.checked_mul(1000)?
                }
            } else {
                let f = n.as_f64()?;
                if f.abs() >= 1e11 {
                    f as i64
                } else {
                    (f * 1000.0) as i64
                }
            };
            DateTime::from_timestamp_millis(millis).map(format)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres-style "2024-01-01 00:00:00+00"
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Grade/GPA columns hold either text or a number depending on how the row
/// was seeded; render both as text.
fn value_to_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub title_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub technologies: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn project_row_to_dto(row: ProjectRow) -> Project {
    Project {
        id: row.id,
        title_en: row.title_en.unwrap_or_default(),
        title_fr: row.title_fr.unwrap_or_default(),
        title_es: row.title_es.unwrap_or_default(),
        description_en: row.description_en,
        description_fr: row.description_fr,
        description_es: row.description_es,
        technologies: split_technologies(row.technologies.as_deref().unwrap_or("")),
        project_url: row.project_url,
        github_url: row.github_url,
        image_url: row.image_url,
        status: row.status.unwrap_or_else(|| "Completed".to_string()),
        start_date: row.start_date,
        end_date: row.end_date,
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

pub fn project_draft_to_row(draft: &ProjectDraft) -> ProjectRow {
    ProjectRow {
        id: None,
        title_en: Some(draft.title_en.clone().unwrap_or_default()),
        title_fr: Some(draft.title_fr.clone().unwrap_or_default()),
        title_es: Some(draft.title_es.clone().unwrap_or_default()),
        description_en: draft.description_en.clone(),
        description_fr: draft.description_fr.clone(),
        description_es: draft.description_es.clone(),
        technologies: draft.technologies.as_deref().map(join_technologies),
        project_url: draft.project_url.clone(),
        github_url: draft.github_url.clone(),
        image_url: draft.image_url.clone(),
        status: Some(
            draft
                .status
                .clone()
                .unwrap_or_else(|| "Completed".to_string()),
        ),
        start_date: draft.start_date.clone(),
        end_date: draft.end_date.clone(),
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Skill
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub proficiency_level: Option<String>,
    pub category: Option<String>,
    pub years_of_experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn skill_row_to_dto(row: SkillRow) -> Skill {
    Skill {
        id: row.id,
        name_en: row.name_en.unwrap_or_default(),
        name_fr: row.name_fr.unwrap_or_default(),
        name_es: row.name_es.unwrap_or_default(),
        description_en: row.description_en,
        description_fr: row.description_fr,
        description_es: row.description_es,
        proficiency_level: ProficiencyLevel::parse_lossy(
            row.proficiency_level.as_deref().unwrap_or(""),
        ),
        category: row.category.unwrap_or_else(|| "General".to_string()),
        years_of_experience: row.years_of_experience,
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

pub fn skill_draft_to_row(draft: &SkillDraft) -> SkillRow {
    // Any casing is accepted; the stored value is always lowercase.
    let level = ProficiencyLevel::parse_lossy(draft.proficiency_level.as_deref().unwrap_or(""));

    SkillRow {
        id: None,
        name_en: Some(draft.name_en.clone().unwrap_or_default()),
        name_fr: Some(draft.name_fr.clone().unwrap_or_default()),
        name_es: Some(draft.name_es.clone().unwrap_or_default()),
        description_en: draft.description_en.clone(),
        description_fr: draft.description_fr.clone(),
        description_es: draft.description_es.clone(),
        proficiency_level: Some(level.as_str().to_string()),
        category: Some(
            draft
                .category
                .clone()
                .unwrap_or_else(|| "General".to_string()),
        ),
        years_of_experience: draft.years_of_experience,
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Education
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub institution_name_en: Option<String>,
    pub institution_name_fr: Option<String>,
    pub institution_name_es: Option<String>,
    pub degree_en: Option<String>,
    pub degree_fr: Option<String>,
    pub degree_es: Option<String>,
    pub field_of_study_en: Option<String>,
    pub field_of_study_fr: Option<String>,
    pub field_of_study_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    pub gpa: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn education_row_to_dto(row: EducationRow) -> Education {
    Education {
        id: row.id,
        institution_name_en: row.institution_name_en.unwrap_or_default(),
        institution_name_fr: row.institution_name_fr.unwrap_or_default(),
        institution_name_es: row.institution_name_es.unwrap_or_default(),
        degree_en: row.degree_en.unwrap_or_default(),
        degree_fr: row.degree_fr.unwrap_or_default(),
        degree_es: row.degree_es.unwrap_or_default(),
        field_of_study_en: row.field_of_study_en.unwrap_or_default(),
        field_of_study_fr: row.field_of_study_fr.unwrap_or_default(),
        field_of_study_es: row.field_of_study_es.unwrap_or_default(),
        description_en: row.description_en,
        description_fr: row.description_fr,
        description_es: row.description_es,
        start_date: row.start_date,
        end_date: row.end_date,
        is_current: row.is_current.unwrap_or(false),
        gpa: value_to_text(row.gpa.as_ref()),
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

pub fn education_draft_to_row(draft: &EducationDraft) -> EducationRow {
    EducationRow {
        id: None,
        institution_name_en: Some(draft.institution_name_en.clone().unwrap_or_default()),
        institution_name_fr: Some(draft.institution_name_fr.clone().unwrap_or_default()),
        institution_name_es: Some(draft.institution_name_es.clone().unwrap_or_default()),
        degree_en: Some(draft.degree_en.clone().unwrap_or_default()),
        degree_fr: Some(draft.degree_fr.clone().unwrap_or_default()),
        degree_es: Some(draft.degree_es.clone().unwrap_or_default()),
        field_of_study_en: Some(draft.field_of_study_en.clone().unwrap_or_default()),
        field_of_study_fr: Some(draft.field_of_study_fr.clone().unwrap_or_default()),
        field_of_study_es: Some(draft.field_of_study_es.clone().unwrap_or_default()),
        description_en: draft.description_en.clone(),
        description_fr: draft.description_fr.clone(),
        description_es: draft.description_es.clone(),
        start_date: draft.start_date.clone(),
        end_date: draft.end_date.clone(),
        is_current: Some(draft.is_current.unwrap_or(false)),
        gpa: draft.gpa.clone().map(Value::String),
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Experience
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub company_name_en: Option<String>,
    pub company_name_fr: Option<String>,
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
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    pub skills_used: Option<String>,
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn experience_row_to_dto(row: ExperienceRow) -> Experience {
    Experience {
        id: row.id,
        company_name_en: row.company_name_en.unwrap_or_default(),
        company_name_fr: row.company_name_fr.unwrap_or_default(),
        company_name_es: row.company_name_es.unwrap_or_default(),
        position_en: row.position_en.unwrap_or_default(),
        position_fr: row.position_fr.unwrap_or_default(),
        position_es: row.position_es.unwrap_or_default(),
        description_en: row.description_en,
        description_fr: row.description_fr,
        description_es: row.description_es,
        location_en: row.location_en,
        location_fr: row.location_fr,
        location_es: row.location_es,
        start_date: row.start_date,
        end_date: row.end_date,
        is_current: row.is_current.unwrap_or(false),
        skills_used: row.skills_used,
        icon: row.icon,
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

pub fn experience_draft_to_row(draft: &ExperienceDraft) -> ExperienceRow {
    // The legacy admin form has a single location field; it fills any
    // localized location left unset.
    let fallback = draft.location.clone();

    ExperienceRow {
        id: None,
        company_name_en: Some(draft.company_name_en.clone().unwrap_or_default()),
        company_name_fr: Some(draft.company_name_fr.clone().unwrap_or_default()),
        company_name_es: Some(draft.company_name_es.clone().unwrap_or_default()),
        position_en: Some(draft.position_en.clone().unwrap_or_default()),
        position_fr: Some(draft.position_fr.clone().unwrap_or_default()),
        position_es: Some(draft.position_es.clone().unwrap_or_default()),
        description_en: draft.description_en.clone(),
        description_fr: draft.description_fr.clone(),
        description_es: draft.description_es.clone(),
        location_en: draft.location_en.clone().or_else(|| fallback.clone()),
        location_fr: draft.location_fr.clone().or_else(|| fallback.clone()),
        location_es: draft.location_es.clone().or(fallback),
        start_date: draft.start_date.clone(),
        end_date: draft.end_date.clone(),
        is_current: Some(draft.is_current.unwrap_or(false)),
        skills_used: draft.skills_used.clone(),
        icon: draft.icon.clone(),
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Hobby
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HobbyRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub name_es: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub description_es: Option<String>,
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn hobby_row_to_dto(row: HobbyRow) -> Hobby {
    Hobby {
        id: row.id,
        name_en: row.name_en.unwrap_or_default(),
        name_fr: row.name_fr.unwrap_or_default(),
        name_es: row.name_es.unwrap_or_default(),
        description_en: row.description_en,
        description_fr: row.description_fr,
        description_es: row.description_es,
        icon: row.icon,
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

pub fn hobby_draft_to_row(draft: &HobbyDraft) -> HobbyRow {
    HobbyRow {
        id: None,
        name_en: Some(draft.name_en.clone().unwrap_or_default()),
        name_fr: Some(draft.name_fr.clone().unwrap_or_default()),
        name_es: Some(draft.name_es.clone().unwrap_or_default()),
        description_en: draft.description_en.clone(),
        description_fr: draft.description_fr.clone(),
        description_es: draft.description_es.clone(),
        icon: draft.icon.clone(),
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Testimonial
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub client_name: Option<String>,
    pub client_position: Option<String>,
    pub client_company: Option<String>,
    pub testimonial_text_en: Option<String>,
    pub testimonial_text_fr: Option<String>,
    pub testimonial_text_es: Option<String>,
    pub rating: Option<i32>,
    pub client_image_url: Option<String>,
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn testimonial_row_to_dto(row: TestimonialRow) -> Testimonial {
    Testimonial {
        id: row.id,
        client_name: row.client_name.unwrap_or_default(),
        client_position: row.client_position.unwrap_or_default(),
        client_company: row.client_company.unwrap_or_default(),
        testimonial_text_en: row.testimonial_text_en.unwrap_or_default(),
        testimonial_text_fr: row.testimonial_text_fr.unwrap_or_default(),
        testimonial_text_es: row.testimonial_text_es.unwrap_or_default(),
        rating: row.rating.unwrap_or(5),
        client_image_url: row.client_image_url,
        status: TestimonialStatus::parse_lossy(row.status.as_deref().unwrap_or("")),
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

/// Public submissions always enter as `PENDING`; the draft has no status
/// field to say otherwise.
pub fn testimonial_draft_to_row(draft: &TestimonialDraft) -> TestimonialRow {
    TestimonialRow {
        id: None,
        client_name: Some(draft.client_name.clone().unwrap_or_default()),
        client_position: Some(draft.client_position.clone().unwrap_or_default()),
        client_company: Some(draft.client_company.clone().unwrap_or_default()),
        testimonial_text_en: Some(draft.testimonial_text_en.clone().unwrap_or_default()),
        testimonial_text_fr: Some(draft.testimonial_text_fr.clone().unwrap_or_default()),
        testimonial_text_es: Some(draft.testimonial_text_es.clone().unwrap_or_default()),
        rating: Some(draft.rating.unwrap_or(5)),
        client_image_url: draft.client_image_url.clone(),
        status: Some(TestimonialStatus::Pending.as_str().to_string()),
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// Message
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

pub fn message_row_to_dto(row: MessageRow) -> Message {
    Message {
        id: row.id,
        name: row.sender_name.unwrap_or_default(),
        email: row.sender_email.unwrap_or_default(),
        subject: row.subject.unwrap_or_default(),
        message: row.message.unwrap_or_default(),
        is_read: row.is_read.unwrap_or(false),
        created_at: to_iso(row.created_at.as_ref()),
        updated_at: to_iso(row.updated_at.as_ref()),
    }
}

/// The honeypot field never reaches storage; callers are expected to have
/// dropped spam before mapping.
pub fn message_draft_to_row(draft: &MessageDraft) -> MessageRow {
    MessageRow {
        id: None,
        sender_name: Some(draft.sender_name.clone()),
        sender_email: Some(draft.sender_email.clone()),
        subject: Some(draft.subject.clone()),
        message: Some(draft.message.clone()),
        is_read: Some(false),
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_iso_accepts_rfc3339() {
        let v = json!("2024-03-01T10:30:00Z");
        assert_eq!(to_iso(Some(&v)).unwrap(), "2024-03-01T10:30:00.000Z");
    }

    #[test]
    fn to_iso_accepts_postgres_style() {
        let v = json!("2024-03-01 10:30:00.123456+00");
        assert_eq!(to_iso(Some(&v)).unwrap(), "2024-03-01T10:30:00.123Z");
    }

    #[test]
    fn to_iso_accepts_bare_date_and_naive_datetime() {
        assert_eq!(
            to_iso(Some(&json!("2024-03-01"))).unwrap(),
            "2024-03-01T00:00:00.000Z"
        );
        assert_eq!(
            to_iso(Some(&json!("2024-03-01T10:30:00"))).unwrap(),
            "2024-03-01T10:30:00.000Z"
        );
    }

    #[test]
    fn to_iso_accepts_unix_epochs() {
        // Seconds
        assert_eq!(
            to_iso(Some(&json!(1_709_287_800))).unwrap(),
            "2024-03-01T10:10:00.000Z"
        );
        // Milliseconds
        assert_eq!(
            to_iso(Some(&json!(1_709_287_800_000i64))).unwrap(),
            "2024-03-01T10:10:00.000Z"
        );
    }

    #[test]
    fn to_iso_never_fails() {
        assert_eq!(to_iso(None), None);
        assert_eq!(to_iso(Some(&json!("not a date"))), None);
        assert_eq!(to_iso(Some(&json!(""))), None);
        assert_eq!(to_iso(Some(&json!(null))), None);
        assert_eq!(to_iso(Some(&json!({"nested": true}))), None);
    }

    #[test]
    fn project_row_defaults() {
        let dto = project_row_to_dto(ProjectRow::default());
        assert_eq!(dto.title_en, "");
        assert_eq!(dto.status, "Completed");
        assert!(dto.technologies.is_empty());
        assert_eq!(dto.created_at, None);
    }

    #[test]
    fn project_insert_payload_omits_id_and_timestamps() {
        let row = project_draft_to_row(&ProjectDraft::default());
        let payload = serde_json::to_value(&row).unwrap();
        let obj = payload.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("created_at"));
        assert!(!obj.contains_key("updated_at"));
        assert_eq!(obj["title_en"], json!(""));
        assert_eq!(obj["description_en"], json!(null));
        assert_eq!(obj["status"], json!("Completed"));
    }

    #[test]
    fn skill_draft_normalizes_proficiency_to_lowercase() {
        let draft = SkillDraft {
            proficiency_level: Some("Expert".into()),
            ..Default::default()
        };
        let row = skill_draft_to_row(&draft);
        assert_eq!(row.proficiency_level.as_deref(), Some("expert"));
    }

    #[test]
    fn education_gpa_accepts_numbers_and_text() {
        let mut row = EducationRow {
            gpa: Some(json!(3.8)),
            ..Default::default()
        };
        assert_eq!(education_row_to_dto(row.clone()).gpa.as_deref(), Some("3.8"));
        row.gpa = Some(json!("First Class Honours"));
        assert_eq!(
            education_row_to_dto(row).gpa.as_deref(),
            Some("First Class Honours")
        );
    }

    #[test]
    fn experience_location_fallback_fills_unset_locales() {
        let draft = ExperienceDraft {
            location_en: Some("Montreal".into()),
            location: Some("Remote".into()),
            ..Default::default()
        };
        let row = experience_draft_to_row(&draft);
        assert_eq!(row.location_en.as_deref(), Some("Montreal"));
        assert_eq!(row.location_fr.as_deref(), Some("Remote"));
        assert_eq!(row.location_es.as_deref(), Some("Remote"));
    }

    #[test]
    fn testimonial_submission_is_always_pending() {
        let row = testimonial_draft_to_row(&TestimonialDraft {
            client_name: Some("Jane".into()),
            rating: None,
            ..Default::default()
        });
        assert_eq!(row.status.as_deref(), Some("PENDING"));
        assert_eq!(row.rating, Some(5));
    }

    #[test]
    fn testimonial_approved_view_derives_from_status() {
        let dto = testimonial_row_to_dto(TestimonialRow {
            status: Some("approved".into()),
            ..Default::default()
        });
        assert!(dto.approved());
        let dto = testimonial_row_to_dto(TestimonialRow::default());
        assert!(!dto.approved());
    }

    #[test]
    fn message_row_maps_sender_columns() {
        let dto = message_row_to_dto(MessageRow {
            sender_name: Some("John Doe".into()),
            sender_email: Some("john@example.com".into()),
            message: Some("Hello there".into()),
            ..Default::default()
        });
        assert_eq!(dto.name, "John Doe");
        assert_eq!(dto.email, "john@example.com");
        assert_eq!(dto.content(), "Hello there");
        assert!(!dto.is_read);
    }
}
