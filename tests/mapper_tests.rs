//! Row/DTO mapper tests: wire shapes, defaults, and preservation of
//! draft fields through the row pipeline.

use portfolio_gateway::gateway::backends::supabase::rows::{
    education_draft_to_row, education_row_to_dto, experience_row_to_dto, project_draft_to_row,
    project_row_to_dto, skill_row_to_dto, testimonial_row_to_dto, to_iso, EducationRow,
    ExperienceRow, ProjectRow, SkillRow, TestimonialRow,
};
use portfolio_gateway::models::{
    EducationDraft, ExperienceDraft, ProficiencyLevel, ProjectDraft, TestimonialStatus,
};
use serde_json::json;

#[test]
fn project_draft_fields_survive_the_row_pipeline() {
    let draft = ProjectDraft {
        title_en: Some("Portfolio".into()),
        title_fr: Some("Portfolio FR".into()),
        description_en: Some("A site".into()),
        technologies: Some(vec!["Rust".into(), "Axum".into()]),
        project_url: Some("https://example.com".into()),
        github_url: Some("https://github.com/x/y".into()),
        status: Some("In Progress".into()),
        start_date: Some("2024-01-01".into()),
        ..Default::default()
    };

    let dto = project_row_to_dto(project_draft_to_row(&draft));
    assert_eq!(dto.title_en, "Portfolio");
    assert_eq!(dto.title_fr, "Portfolio FR");
    assert_eq!(dto.title_es, "");
    assert_eq!(dto.description_en.as_deref(), Some("A site"));
    assert_eq!(dto.technologies, vec!["Rust", "Axum"]);
    assert_eq!(dto.project_url.as_deref(), Some("https://example.com"));
    assert_eq!(dto.status, "In Progress");
    assert_eq!(dto.start_date.as_deref(), Some("2024-01-01"));
}

#[test]
fn project_row_parses_snake_case_json() {
    let row: ProjectRow = serde_json::from_value(json!({
        "id": 7,
        "title_en": "Site",
        "technologies": "Rust, Postgres , ,Svelte",
        "created_at": "2024-03-01T10:30:00+00:00",
        "some_future_column": "ignored"
    }))
    .unwrap();

    let dto = project_row_to_dto(row);
    assert_eq!(dto.id, Some(7));
    assert_eq!(dto.technologies, vec!["Rust", "Postgres", "Svelte"]);
    assert_eq!(dto.created_at.as_deref(), Some("2024-03-01T10:30:00.000Z"));
}

#[test]
fn project_dto_serializes_camel_case() {
    let dto = project_row_to_dto(ProjectRow {
        id: Some(1),
        title_en: Some("Site".into()),
        project_url: Some("https://example.com".into()),
        ..Default::default()
    });
    let value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["titleEn"], json!("Site"));
    assert_eq!(value["projectUrl"], json!("https://example.com"));
    assert!(value.get("title_en").is_none());
}

#[test]
fn project_draft_accepts_legacy_aliases() {
    let draft: ProjectDraft = serde_json::from_value(json!({
        "titleEn": "Site",
        "liveLink": "https://live.example",
        "githubLink": "https://github.com/x/y"
    }))
    .unwrap();
    assert_eq!(draft.project_url.as_deref(), Some("https://live.example"));
    assert_eq!(draft.github_url.as_deref(), Some("https://github.com/x/y"));
}

#[test]
fn skill_row_unknown_proficiency_falls_back() {
    let row: SkillRow = serde_json::from_value(json!({
        "id": 1,
        "name_en": "Rust",
        "proficiency_level": "grandmaster"
    }))
    .unwrap();
    let dto = skill_row_to_dto(row);
    assert_eq!(dto.proficiency_level, ProficiencyLevel::Intermediate);
    assert_eq!(dto.category, "General");
}

#[test]
fn education_draft_aliases_and_gpa() {
    let draft: EducationDraft = serde_json::from_value(json!({
        "institutionEn": "MIT",
        "fieldEn": "CS",
        "grade": "3.9"
    }))
    .unwrap();
    assert_eq!(draft.institution_name_en.as_deref(), Some("MIT"));
    assert_eq!(draft.field_of_study_en.as_deref(), Some("CS"));
    assert_eq!(draft.gpa.as_deref(), Some("3.9"));

    let dto = education_row_to_dto(education_draft_to_row(&draft));
    assert_eq!(dto.institution_name_en, "MIT");
    assert_eq!(dto.gpa.as_deref(), Some("3.9"));
    assert!(!dto.is_current);
}

#[test]
fn education_row_numeric_timestamps_normalize() {
    let row: EducationRow = serde_json::from_value(json!({
        "id": 2,
        "created_at": 1_709_287_800,
        "updated_at": 1_709_287_800_000i64
    }))
    .unwrap();
    let dto = education_row_to_dto(row);
    assert_eq!(dto.created_at, dto.updated_at);
}

#[test]
fn experience_row_location_accessor_falls_back_across_locales() {
    let row: ExperienceRow = serde_json::from_value(json!({
        "company_name_en": "Acme",
        "position_en": "Engineer",
        "location_fr": "Paris"
    }))
    .unwrap();
    let dto = experience_row_to_dto(row);
    assert_eq!(dto.location(), Some("Paris"));
}

#[test]
fn experience_draft_single_location_field() {
    let draft: ExperienceDraft = serde_json::from_value(json!({
        "companyEn": "Acme",
        "location": "Remote"
    }))
    .unwrap();
    assert_eq!(draft.company_name_en.as_deref(), Some("Acme"));
    assert_eq!(draft.location.as_deref(), Some("Remote"));
}

#[test]
fn testimonial_row_status_is_lossy_uppercase() {
    for (raw, expected) in [
        ("APPROVED", TestimonialStatus::Approved),
        ("approved", TestimonialStatus::Approved),
        ("PENDING", TestimonialStatus::Pending),
        ("rejected", TestimonialStatus::Pending),
    ] {
        let row: TestimonialRow =
            serde_json::from_value(json!({ "id": 1, "status": raw })).unwrap();
        assert_eq!(testimonial_row_to_dto(row).status, expected, "raw={raw}");
    }
}

#[test]
fn timestamp_normalization_edge_cases() {
    assert_eq!(
        to_iso(Some(&json!("2024-06-15 08:00:00"))).as_deref(),
        Some("2024-06-15T08:00:00.000Z")
    );
    assert_eq!(
        to_iso(Some(&json!("2024-06-15"))).as_deref(),
        Some("2024-06-15T00:00:00.000Z")
    );
    assert_eq!(to_iso(Some(&json!("June 15th"))), None);
    assert_eq!(to_iso(Some(&json!(true))), None);
    assert_eq!(to_iso(None), None);
}
