//! Direct database-as-a-service backend.
//!
//! Bypasses the legacy server entirely: table operations against the data
//! interface with the Row/DTO mappers applied in both directions, password
//! auth against the token endpoint, and the resume bucket on object
//! storage. Table and column names are snake_case; the default ordering is
//! most-recent-first, with the time-ranged tables ordered by start date.

mod client;
pub mod rows;

pub use client::SupabaseClient;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::gateway::config::{GatewayConfig, ResumePaths};
use crate::gateway::contract::{
    AuthGateway, EducationGateway, ExperienceGateway, GatewayError, GatewayResult,
    HobbiesGateway, MessagesGateway, PortfolioGateway, ProjectsGateway, ResumeGateway,
    SkillsGateway, TestimonialsGateway,
};
use crate::models::{
    AuthUser, Education, EducationDraft, Experience, ExperienceDraft, Hobby, HobbyDraft,
    Message, MessageDraft, MessageReceipt, Project, ProjectDraft, ResumeFile, ResumeLanguage,
    Session, SessionEvent, Skill, SkillDraft, Testimonial, TestimonialDraft, TestimonialStatus,
};

use rows::{
    education_draft_to_row, education_row_to_dto, experience_draft_to_row,
    experience_row_to_dto, hobby_draft_to_row, hobby_row_to_dto, message_draft_to_row,
    message_row_to_dto, project_draft_to_row, project_row_to_dto, skill_draft_to_row,
    skill_row_to_dto, testimonial_draft_to_row, testimonial_row_to_dto, EducationRow,
    ExperienceRow, HobbyRow, MessageRow, ProjectRow, SkillRow, TestimonialRow,
};

const RECENT_FIRST: &str = "order=created_at.desc";
const BY_START_DATE: &str = "order=start_date.desc.nullslast";

pub struct SupabaseGateway {
    client: SupabaseClient,
    resume: ResumePaths,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SupabaseGateway {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let url = config.supabase_url.as_deref().unwrap_or("");
        let key = config.supabase_anon_key.as_deref().unwrap_or("");
        let client = SupabaseClient::new(url, key)?;
        let (events, _) = broadcast::channel(16);
        Ok(SupabaseGateway {
            client,
            resume: config.resume.clone(),
            session: RwLock::new(None),
            events,
        })
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    /// Exchange the refresh token for a fresh session and notify
    /// subscribers. External sign-out shows up here as an auth error.
    pub async fn refresh_session(&self) -> GatewayResult<Session> {
        match self.client.refresh().await {
            Ok(session) => {
                *self.session.write() = Some(session.clone());
                self.emit(SessionEvent::Refreshed(session.clone()));
                Ok(session)
            }
            Err(e) => {
                *self.session.write() = None;
                self.emit(SessionEvent::SignedOut);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ProjectsGateway for SupabaseGateway {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        let rows: Vec<ProjectRow> = self.client.select("projects", RECENT_FIRST).await?;
        Ok(rows.into_iter().map(project_row_to_dto).collect())
    }

    async fn get_project(&self, id: i64) -> GatewayResult<Project> {
        let row: ProjectRow = self.client.select_by_id("projects", id).await?;
        Ok(project_row_to_dto(row))
    }

    async fn create_project(&self, draft: ProjectDraft) -> GatewayResult<Project> {
        let row: ProjectRow = self
            .client
            .insert("projects", &project_draft_to_row(&draft))
            .await?;
        Ok(project_row_to_dto(row))
    }

    async fn update_project(&self, id: i64, draft: ProjectDraft) -> GatewayResult<Project> {
        let row: ProjectRow = self
            .client
            .update("projects", id, &project_draft_to_row(&draft))
            .await?;
        Ok(project_row_to_dto(row))
    }

    async fn delete_project(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("projects", id).await
    }
}

#[async_trait]
impl SkillsGateway for SupabaseGateway {
    async fn list_skills(&self) -> GatewayResult<Vec<Skill>> {
        let rows: Vec<SkillRow> = self.client.select("skills", RECENT_FIRST).await?;
        Ok(rows.into_iter().map(skill_row_to_dto).collect())
    }

    async fn get_skill(&self, id: i64) -> GatewayResult<Skill> {
        let row: SkillRow = self.client.select_by_id("skills", id).await?;
        Ok(skill_row_to_dto(row))
    }

    async fn create_skill(&self, draft: SkillDraft) -> GatewayResult<Skill> {
        let row: SkillRow = self
            .client
            .insert("skills", &skill_draft_to_row(&draft))
            .await?;
        Ok(skill_row_to_dto(row))
    }

    async fn update_skill(&self, id: i64, draft: SkillDraft) -> GatewayResult<Skill> {
        let row: SkillRow = self
            .client
            .update("skills", id, &skill_draft_to_row(&draft))
            .await?;
        Ok(skill_row_to_dto(row))
    }

    async fn delete_skill(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("skills", id).await
    }
}

#[async_trait]
impl EducationGateway for SupabaseGateway {
    async fn list_education(&self) -> GatewayResult<Vec<Education>> {
        let rows: Vec<EducationRow> = self.client.select("education", BY_START_DATE).await?;
        Ok(rows.into_iter().map(education_row_to_dto).collect())
    }

    async fn get_education(&self, id: i64) -> GatewayResult<Education> {
        let row: EducationRow = self.client.select_by_id("education", id).await?;
        Ok(education_row_to_dto(row))
    }

    async fn create_education(&self, draft: EducationDraft) -> GatewayResult<Education> {
        let row: EducationRow = self
            .client
            .insert("education", &education_draft_to_row(&draft))
            .await?;
        Ok(education_row_to_dto(row))
    }

    async fn update_education(
        &self,
        id: i64,
        draft: EducationDraft,
    ) -> GatewayResult<Education> {
        let row: EducationRow = self
            .client
            .update("education", id, &education_draft_to_row(&draft))
            .await?;
        Ok(education_row_to_dto(row))
    }

    async fn delete_education(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("education", id).await
    }
}

#[async_trait]
impl ExperienceGateway for SupabaseGateway {
    async fn list_experience(&self) -> GatewayResult<Vec<Experience>> {
        let rows: Vec<ExperienceRow> =
            self.client.select("work_experience", BY_START_DATE).await?;
        Ok(rows.into_iter().map(experience_row_to_dto).collect())
    }

    async fn get_experience(&self, id: i64) -> GatewayResult<Experience> {
        let row: ExperienceRow = self.client.select_by_id("work_experience", id).await?;
        Ok(experience_row_to_dto(row))
    }

    async fn create_experience(&self, draft: ExperienceDraft) -> GatewayResult<Experience> {
        let row: ExperienceRow = self
            .client
            .insert("work_experience", &experience_draft_to_row(&draft))
            .await?;
        Ok(experience_row_to_dto(row))
    }

    async fn update_experience(
        &self,
        id: i64,
        draft: ExperienceDraft,
    ) -> GatewayResult<Experience> {
        let row: ExperienceRow = self
            .client
            .update("work_experience", id, &experience_draft_to_row(&draft))
            .await?;
        Ok(experience_row_to_dto(row))
    }

    async fn delete_experience(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("work_experience", id).await
    }
}

#[async_trait]
impl HobbiesGateway for SupabaseGateway {
    async fn list_hobbies(&self) -> GatewayResult<Vec<Hobby>> {
        let rows: Vec<HobbyRow> = self.client.select("hobbies", RECENT_FIRST).await?;
        Ok(rows.into_iter().map(hobby_row_to_dto).collect())
    }

    async fn get_hobby(&self, id: i64) -> GatewayResult<Hobby> {
        let row: HobbyRow = self.client.select_by_id("hobbies", id).await?;
        Ok(hobby_row_to_dto(row))
    }

    async fn create_hobby(&self, draft: HobbyDraft) -> GatewayResult<Hobby> {
        let row: HobbyRow = self
            .client
            .insert("hobbies", &hobby_draft_to_row(&draft))
            .await?;
        Ok(hobby_row_to_dto(row))
    }

    async fn update_hobby(&self, id: i64, draft: HobbyDraft) -> GatewayResult<Hobby> {
        let row: HobbyRow = self
            .client
            .update("hobbies", id, &hobby_draft_to_row(&draft))
            .await?;
        Ok(hobby_row_to_dto(row))
    }

    async fn delete_hobby(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("hobbies", id).await
    }
}

#[async_trait]
impl TestimonialsGateway for SupabaseGateway {
    async fn list_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        let rows: Vec<TestimonialRow> =
            self.client.select("testimonials", RECENT_FIRST).await?;
        Ok(rows.into_iter().map(testimonial_row_to_dto).collect())
    }

    async fn get_testimonial(&self, id: i64) -> GatewayResult<Testimonial> {
        let row: TestimonialRow = self.client.select_by_id("testimonials", id).await?;
        Ok(testimonial_row_to_dto(row))
    }

    async fn submit_testimonial(&self, draft: TestimonialDraft) -> GatewayResult<Testimonial> {
        let row: TestimonialRow = self
            .client
            .insert("testimonials", &testimonial_draft_to_row(&draft))
            .await?;
        Ok(testimonial_row_to_dto(row))
    }

    async fn update_testimonial(
        &self,
        id: i64,
        draft: TestimonialDraft,
    ) -> GatewayResult<Testimonial> {
        // Leave status out of the patch so an edit never un-approves.
        let mut patch =
            serde_json::to_value(testimonial_draft_to_row(&draft)).map_err(GatewayError::from)?;
        if let Some(obj) = patch.as_object_mut() {
            obj.remove("status");
        }
        let row: TestimonialRow = self.client.update("testimonials", id, &patch).await?;
        Ok(testimonial_row_to_dto(row))
    }

    async fn delete_testimonial(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("testimonials", id).await
    }

    async fn approved_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        let query = format!(
            "status=eq.{}&{RECENT_FIRST}",
            TestimonialStatus::Approved.as_str()
        );
        let rows: Vec<TestimonialRow> = self.client.select("testimonials", &query).await?;
        Ok(rows.into_iter().map(testimonial_row_to_dto).collect())
    }

    async fn pending_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        let query = format!(
            "status=eq.{}&{RECENT_FIRST}",
            TestimonialStatus::Pending.as_str()
        );
        let rows: Vec<TestimonialRow> = self.client.select("testimonials", &query).await?;
        Ok(rows.into_iter().map(testimonial_row_to_dto).collect())
    }

    async fn approve_testimonial(&self, id: i64) -> GatewayResult<Testimonial> {
        let patch = serde_json::json!({ "status": TestimonialStatus::Approved.as_str() });
        let row: TestimonialRow = self.client.update("testimonials", id, &patch).await?;
        Ok(testimonial_row_to_dto(row))
    }
}

#[async_trait]
impl MessagesGateway for SupabaseGateway {
    async fn list_messages(&self) -> GatewayResult<Vec<Message>> {
        let rows: Vec<MessageRow> = self.client.select("messages", RECENT_FIRST).await?;
        Ok(rows.into_iter().map(message_row_to_dto).collect())
    }

    async fn get_message(&self, id: i64) -> GatewayResult<Message> {
        let row: MessageRow = self.client.select_by_id("messages", id).await?;
        Ok(message_row_to_dto(row))
    }

    async fn send_message(&self, draft: MessageDraft) -> GatewayResult<MessageReceipt> {
        if draft.is_spam() {
            log::info!("dropping contact message flagged by honeypot");
            return Ok(MessageReceipt { id: None });
        }
        let row: MessageRow = self
            .client
            .insert("messages", &message_draft_to_row(&draft))
            .await?;
        Ok(MessageReceipt { id: row.id })
    }

    async fn mark_message_read(&self, id: i64) -> GatewayResult<Message> {
        let patch = serde_json::json!({ "is_read": true });
        let row: MessageRow = self.client.update("messages", id, &patch).await?;
        Ok(message_row_to_dto(row))
    }

    async fn delete_message(&self, id: i64) -> GatewayResult<()> {
        self.client.delete_row("messages", id).await
    }
}

#[async_trait]
impl AuthGateway for SupabaseGateway {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let session = self.client.sign_in(email, password).await?;
        *self.session.write() = Some(session.clone());
        self.emit(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn logout(&self) -> GatewayResult<()> {
        let result = self.client.sign_out().await;
        *self.session.write() = None;
        self.emit(SessionEvent::SignedOut);
        result
    }

    async fn current_session(&self) -> GatewayResult<Option<Session>> {
        Ok(self.session.read().clone())
    }

    async fn check_admin(&self, user: &AuthUser) -> GatewayResult<bool> {
        let args = serde_json::json!({ "user_id": user.id });
        self.client.rpc("is_admin", &args).await
    }

    fn session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl ResumeGateway for SupabaseGateway {
    async fn upload_resume(
        &self,
        bytes: Vec<u8>,
        language: ResumeLanguage,
    ) -> GatewayResult<()> {
        let path = self.resume.upload_path(language);
        self.client
            .storage_upload(&self.resume.bucket, &path, bytes, "application/pdf")
            .await
    }

    async fn download_resume(&self, language: ResumeLanguage) -> GatewayResult<ResumeFile> {
        for path in self.resume.candidates(language) {
            if let Some(bytes) = self
                .client
                .storage_fetch_public(&self.resume.bucket, &path)
                .await?
            {
                let filename = path
                    .rsplit('/')
                    .next()
                    .unwrap_or(path.as_str())
                    .to_string();
                return Ok(ResumeFile {
                    filename,
                    path,
                    content_type: "application/pdf".to_string(),
                    bytes,
                });
            }
        }
        Err(
            GatewayError::not_found(format!("no resume stored for language {language}"))
                .with_operation("download_resume"),
        )
    }
}

#[async_trait]
impl PortfolioGateway for SupabaseGateway {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn health_check(&self) -> GatewayResult<bool> {
        // A one-row read is the cheapest end-to-end probe of the data API.
        let result: GatewayResult<Vec<serde_json::Value>> =
            self.client.select("projects", "limit=1").await;
        Ok(result.is_ok())
    }
}
