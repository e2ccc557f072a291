//! Application-facing data types.
//!
//! DTOs mirror the camelCase wire shape shared by both backends; draft
//! types carry create/update payloads and accept the legacy admin-UI field
//! aliases on input. Storage-facing snake_case rows live with the direct
//! backend in `gateway::backends::supabase::rows`.

mod auth;
mod content;

pub use auth::{AuthUser, ResumeFile, ResumeLanguage, Session, SessionEvent};
pub use content::{
    join_technologies, split_technologies, Education, EducationDraft, Experience,
    ExperienceDraft, Hobby, HobbyDraft, Message, MessageDraft, MessageReceipt,
    ProficiencyLevel, Project, ProjectDraft, Skill, SkillDraft, Testimonial,
    TestimonialDraft, TestimonialStatus,
};
