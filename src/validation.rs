//! Pre-submission validation for the two public forms.
//!
//! These checks run before anything leaves the machine, so both forms give
//! identical feedback no matter which backend is active. Server-side
//! validation still applies; this layer exists for fast feedback, not
//! enforcement.

use thiserror::Error;

use crate::models::{MessageDraft, TestimonialDraft};

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

/// All failed checks for a submission, one entry per field.
pub type ValidationErrors = Vec<ValidationError>;

const CONTACT_NAME_MIN: usize = 2;
const CONTACT_NAME_MAX: usize = 100;
const CONTACT_SUBJECT_MIN: usize = 3;
const CONTACT_SUBJECT_MAX: usize = 200;
const CONTACT_MESSAGE_MIN_CHARS: usize = 20;
const CONTACT_MESSAGE_MIN_WORDS: usize = 5;
const CONTACT_MESSAGE_MAX_CHARS: usize = 2000;

const TESTIMONIAL_NAME_MIN: usize = 2;
const TESTIMONIAL_NAME_MAX: usize = 100;
const TESTIMONIAL_AFFILIATION_MIN: usize = 2;
const TESTIMONIAL_AFFILIATION_MAX: usize = 120;
const TESTIMONIAL_TEXT_MIN_CHARS: usize = 30;
const TESTIMONIAL_TEXT_MIN_WORDS: usize = 6;
const TESTIMONIAL_TEXT_MAX_CHARS: usize = 1200;

/// Validate a contact form submission.
///
/// The honeypot field is deliberately not validated here; spam detection
/// happens at send time and must stay invisible to the sender.
pub fn validate_contact(draft: &MessageDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_length(
        &mut errors,
        "name",
        &draft.sender_name,
        CONTACT_NAME_MIN,
        CONTACT_NAME_MAX,
    );
    if !is_plausible_email(draft.sender_email.trim()) {
        errors.push(ValidationError::new("email", "enter a valid email address"));
    }
    check_length(
        &mut errors,
        "subject",
        &draft.subject,
        CONTACT_SUBJECT_MIN,
        CONTACT_SUBJECT_MAX,
    );
    check_body(
        &mut errors,
        "message",
        &draft.message,
        CONTACT_MESSAGE_MIN_CHARS,
        CONTACT_MESSAGE_MIN_WORDS,
        CONTACT_MESSAGE_MAX_CHARS,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a public testimonial submission.
///
/// At least one localized text is required; every provided text must meet
/// the length and word-count bounds.
pub fn validate_testimonial(draft: &TestimonialDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_length(
        &mut errors,
        "clientName",
        draft.client_name.as_deref().unwrap_or(""),
        TESTIMONIAL_NAME_MIN,
        TESTIMONIAL_NAME_MAX,
    );
    check_length(
        &mut errors,
        "clientPosition",
        draft.client_position.as_deref().unwrap_or(""),
        TESTIMONIAL_AFFILIATION_MIN,
        TESTIMONIAL_AFFILIATION_MAX,
    );
    check_length(
        &mut errors,
        "clientCompany",
        draft.client_company.as_deref().unwrap_or(""),
        TESTIMONIAL_AFFILIATION_MIN,
        TESTIMONIAL_AFFILIATION_MAX,
    );

    let texts = [
        ("testimonialTextEn", draft.testimonial_text_en.as_deref()),
        ("testimonialTextFr", draft.testimonial_text_fr.as_deref()),
        ("testimonialTextEs", draft.testimonial_text_es.as_deref()),
    ];
    let mut any_text = false;
    for (field, text) in texts {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        any_text = true;
        check_body(
            &mut errors,
            field,
            text,
            TESTIMONIAL_TEXT_MIN_CHARS,
            TESTIMONIAL_TEXT_MIN_WORDS,
            TESTIMONIAL_TEXT_MAX_CHARS,
        );
    }
    if !any_text {
        errors.push(ValidationError::new(
            "testimonialText",
            "provide the testimonial text in at least one language",
        ));
    }

    if let Some(rating) = draft.rating {
        if !(1..=5).contains(&rating) {
            errors.push(ValidationError::new("rating", "rating must be between 1 and 5"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len < min {
        errors.push(ValidationError::new(
            field,
            format!("must be at least {min} characters"),
        ));
    } else if len > max {
        errors.push(ValidationError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}

fn check_body(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min_chars: usize,
    min_words: usize,
    max_chars: usize,
) {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    let words = trimmed.split_whitespace().count();
    if chars < min_chars {
        errors.push(ValidationError::new(
            field,
            format!("must be at least {min_chars} characters"),
        ));
    } else if chars > max_chars {
        errors.push(ValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    if words < min_words {
        errors.push(ValidationError::new(
            field,
            format!("must contain at least {min_words} words"),
        ));
    }
}

/// Deliberately loose email shape check: one `@`, a non-empty local part,
/// and a dotted domain without whitespace.
fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.contains(char::is_whitespace)
        && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_contact() -> MessageDraft {
        MessageDraft {
            sender_name: "Jane Doe".into(),
            sender_email: "jane@example.com".into(),
            subject: "Opportunity".into(),
            message: "I would like to talk about a role on my team.".into(),
            website: None,
        }
    }

    #[test]
    fn valid_contact_passes() {
        assert!(validate_contact(&good_contact()).is_ok());
    }

    #[test]
    fn contact_rejects_short_name_and_bad_email() {
        let draft = MessageDraft {
            sender_name: "J".into(),
            sender_email: "not-an-email".into(),
            ..good_contact()
        };
        let errors = validate_contact(&draft).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
    }

    #[test]
    fn contact_message_needs_enough_words() {
        let draft = MessageDraft {
            message: "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".into(),
            ..good_contact()
        };
        let errors = validate_contact(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "message"));
    }

    #[test]
    fn contact_message_has_upper_bound() {
        let draft = MessageDraft {
            message: "word ".repeat(500),
            ..good_contact()
        };
        assert!(validate_contact(&draft).is_err());
    }

    #[test]
    fn email_shape_checks() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
        assert!(!is_plausible_email("a@b@c.co"));
    }

    fn good_testimonial() -> TestimonialDraft {
        TestimonialDraft {
            client_name: Some("John Smith".into()),
            client_position: Some("Engineering Manager".into()),
            client_company: Some("Acme Corp".into()),
            testimonial_text_en: Some(
                "Working together on the platform was a genuinely great experience.".into(),
            ),
            rating: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn valid_testimonial_passes() {
        assert!(validate_testimonial(&good_testimonial()).is_ok());
    }

    #[test]
    fn testimonial_requires_some_text() {
        let draft = TestimonialDraft {
            testimonial_text_en: None,
            ..good_testimonial()
        };
        let errors = validate_testimonial(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "testimonialText"));
    }

    #[test]
    fn testimonial_text_bounds_apply_per_language() {
        let draft = TestimonialDraft {
            testimonial_text_fr: Some("Trop court".into()),
            ..good_testimonial()
        };
        let errors = validate_testimonial(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "testimonialTextFr"));
    }

    #[test]
    fn testimonial_rating_out_of_range() {
        let draft = TestimonialDraft {
            rating: Some(6),
            ..good_testimonial()
        };
        let errors = validate_testimonial(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "rating"));
    }
}
