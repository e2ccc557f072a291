//! Per-entity content gateway traits.
//!
//! Each content type exposes the same uniform CRUD contract; both backends
//! return structurally identical results, so callers never know which wire
//! protocol served them. Listing order is part of the contract:
//! most-recent-first by creation time, except the time-ranged entities
//! (education, experience) which list by start date descending.

use async_trait::async_trait;

use super::error::GatewayResult;
use crate::models::{
    Education, EducationDraft, Experience, ExperienceDraft, Hobby, HobbyDraft, Message,
    MessageDraft, MessageReceipt, Project, ProjectDraft, Skill, SkillDraft, Testimonial,
    TestimonialDraft,
};

#[async_trait]
pub trait ProjectsGateway: Send + Sync {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>>;
    async fn get_project(&self, id: i64) -> GatewayResult<Project>;
    async fn create_project(&self, draft: ProjectDraft) -> GatewayResult<Project>;
    async fn update_project(&self, id: i64, draft: ProjectDraft) -> GatewayResult<Project>;
    async fn delete_project(&self, id: i64) -> GatewayResult<()>;
}

#[async_trait]
pub trait SkillsGateway: Send + Sync {
    async fn list_skills(&self) -> GatewayResult<Vec<Skill>>;
    async fn get_skill(&self, id: i64) -> GatewayResult<Skill>;
    async fn create_skill(&self, draft: SkillDraft) -> GatewayResult<Skill>;
    async fn update_skill(&self, id: i64, draft: SkillDraft) -> GatewayResult<Skill>;
    async fn delete_skill(&self, id: i64) -> GatewayResult<()>;
}

#[async_trait]
pub trait EducationGateway: Send + Sync {
    async fn list_education(&self) -> GatewayResult<Vec<Education>>;
    async fn get_education(&self, id: i64) -> GatewayResult<Education>;
    async fn create_education(&self, draft: EducationDraft) -> GatewayResult<Education>;
    async fn update_education(&self, id: i64, draft: EducationDraft)
        -> GatewayResult<Education>;
    async fn delete_education(&self, id: i64) -> GatewayResult<()>;
}

#[async_trait]
pub trait ExperienceGateway: Send + Sync {
    async fn list_experience(&self) -> GatewayResult<Vec<Experience>>;
    async fn get_experience(&self, id: i64) -> GatewayResult<Experience>;
    async fn create_experience(&self, draft: ExperienceDraft) -> GatewayResult<Experience>;
    async fn update_experience(
        &self,
        id: i64,
        draft: ExperienceDraft,
    ) -> GatewayResult<Experience>;
    async fn delete_experience(&self, id: i64) -> GatewayResult<()>;
}

#[async_trait]
pub trait HobbiesGateway: Send + Sync {
    async fn list_hobbies(&self) -> GatewayResult<Vec<Hobby>>;
    async fn get_hobby(&self, id: i64) -> GatewayResult<Hobby>;
    async fn create_hobby(&self, draft: HobbyDraft) -> GatewayResult<Hobby>;
    async fn update_hobby(&self, id: i64, draft: HobbyDraft) -> GatewayResult<Hobby>;
    async fn delete_hobby(&self, id: i64) -> GatewayResult<()>;
}

/// Testimonials add moderation on top of the uniform CRUD contract.
#[async_trait]
pub trait TestimonialsGateway: Send + Sync {
    async fn list_testimonials(&self) -> GatewayResult<Vec<Testimonial>>;
    async fn get_testimonial(&self, id: i64) -> GatewayResult<Testimonial>;

    /// Public submission. The stored row always enters as `PENDING`.
    async fn submit_testimonial(&self, draft: TestimonialDraft) -> GatewayResult<Testimonial>;

    async fn update_testimonial(
        &self,
        id: i64,
        draft: TestimonialDraft,
    ) -> GatewayResult<Testimonial>;
    async fn delete_testimonial(&self, id: i64) -> GatewayResult<()>;

    /// Approved rows only; never returns a `PENDING` row.
    async fn approved_testimonials(&self) -> GatewayResult<Vec<Testimonial>>;

    /// Pending rows only; never returns an `APPROVED` row.
    async fn pending_testimonials(&self) -> GatewayResult<Vec<Testimonial>>;

    /// Status-only update, the single `PENDING -> APPROVED` transition.
    /// There is no reverse path.
    async fn approve_testimonial(&self, id: i64) -> GatewayResult<Testimonial>;
}

/// Messages are write-once. After creation only the read flag may change,
/// and rows may be deleted.
#[async_trait]
pub trait MessagesGateway: Send + Sync {
    async fn list_messages(&self) -> GatewayResult<Vec<Message>>;
    async fn get_message(&self, id: i64) -> GatewayResult<Message>;

    /// Contact form submission. A draft with a non-empty honeypot field is
    /// reported as success without persisting anything.
    async fn send_message(&self, draft: MessageDraft) -> GatewayResult<MessageReceipt>;

    async fn mark_message_read(&self, id: i64) -> GatewayResult<Message>;
    async fn delete_message(&self, id: i64) -> GatewayResult<()>;
}
