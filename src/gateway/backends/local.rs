//! In-memory gateway for unit tests and offline development.
//!
//! Stores rows in plain maps behind a `parking_lot::RwLock` and runs every
//! draft through the same Row/DTO mappers the direct backend uses, so
//! mapper defaults and normalization are exercised even without a network.
//! Auth is scriptable: seed users with [`LocalGateway::with_user`], grant
//! admin with [`LocalGateway::grant_admin`], and force the admin check to
//! fail with [`LocalGateway::fail_admin_checks`].

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::gateway::backends::supabase::rows::{
    education_draft_to_row, education_row_to_dto, experience_draft_to_row,
    experience_row_to_dto, hobby_draft_to_row, hobby_row_to_dto, message_draft_to_row,
    message_row_to_dto, project_draft_to_row, project_row_to_dto, skill_draft_to_row,
    skill_row_to_dto, testimonial_draft_to_row, testimonial_row_to_dto, EducationRow,
    ExperienceRow, HobbyRow, MessageRow, ProjectRow, SkillRow, TestimonialRow,
};
use crate::gateway::config::GatewayConfig;
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

#[derive(Debug, Clone)]
struct LocalUser {
    id: String,
    email: String,
    password: String,
    role: Option<String>,
}

#[derive(Default)]
struct LocalState {
    next_id: i64,
    projects: HashMap<i64, ProjectRow>,
    skills: HashMap<i64, SkillRow>,
    education: HashMap<i64, EducationRow>,
    experience: HashMap<i64, ExperienceRow>,
    hobbies: HashMap<i64, HobbyRow>,
    testimonials: HashMap<i64, TestimonialRow>,
    messages: HashMap<i64, MessageRow>,
    resume_files: HashMap<String, Vec<u8>>,
    users: Vec<LocalUser>,
    admins: HashSet<String>,
    fail_admin_checks: bool,
    session: Option<Session>,
}

/// In-memory implementation of the full gateway contract.
pub struct LocalGateway {
    state: RwLock<LocalState>,
    resume: crate::gateway::config::ResumePaths,
    events: broadcast::Sender<SessionEvent>,
}

impl LocalGateway {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        LocalGateway {
            state: RwLock::new(LocalState::default()),
            resume: GatewayConfig::default().resume,
            events,
        }
    }

    pub fn with_config(config: &GatewayConfig) -> Self {
        let (events, _) = broadcast::channel(16);
        LocalGateway {
            state: RwLock::new(LocalState::default()),
            resume: config.resume.clone(),
            events,
        }
    }

    /// Seed a login account. Returns the generated user id.
    pub fn with_user(&self, email: &str, password: &str, role: Option<&str>) -> String {
        let mut state = self.state.write();
        let id = format!("local-user-{}", state.users.len() + 1);
        state.users.push(LocalUser {
            id: id.clone(),
            email: email.to_lowercase(),
            password: password.to_string(),
            role: role.map(str::to_string),
        });
        id
    }

    /// Make `check_admin` answer true for the given user id.
    pub fn grant_admin(&self, user_id: &str) {
        self.state.write().admins.insert(user_id.to_string());
    }

    /// Make every subsequent `check_admin` call fail with a transport error.
    pub fn fail_admin_checks(&self, fail: bool) {
        self.state.write().fail_admin_checks = fail;
    }

    fn next_id(state: &mut LocalState) -> i64 {
        state.next_id += 1;
        state.next_id
    }

    fn now() -> Value {
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn missing(entity: &'static str, id: i64) -> GatewayError {
        GatewayError::not_found(format!("{entity} {id} not found")).with_entity(entity)
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}

impl Default for LocalGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectsGateway for LocalGateway {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        let state = self.state.read();
        let mut items: Vec<Project> = state
            .projects
            .values()
            .cloned()
            .map(project_row_to_dto)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_project(&self, id: i64) -> GatewayResult<Project> {
        let state = self.state.read();
        state
            .projects
            .get(&id)
            .cloned()
            .map(project_row_to_dto)
            .ok_or_else(|| Self::missing("project", id))
    }

    async fn create_project(&self, draft: ProjectDraft) -> GatewayResult<Project> {
        let mut state = self.state.write();
        let mut row = project_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.projects.insert(id, row.clone());
        Ok(project_row_to_dto(row))
    }

    async fn update_project(&self, id: i64, draft: ProjectDraft) -> GatewayResult<Project> {
        let mut state = self.state.write();
        let existing = state
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing("project", id))?;
        let mut row = project_draft_to_row(&draft);
        row.id = Some(id);
        row.created_at = existing.created_at;
        row.updated_at = Some(Self::now());
        state.projects.insert(id, row.clone());
        Ok(project_row_to_dto(row))
    }

    async fn delete_project(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("project", id))
    }
}

#[async_trait]
impl SkillsGateway for LocalGateway {
    async fn list_skills(&self) -> GatewayResult<Vec<Skill>> {
        let state = self.state.read();
        let mut items: Vec<Skill> = state.skills.values().cloned().map(skill_row_to_dto).collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_skill(&self, id: i64) -> GatewayResult<Skill> {
        let state = self.state.read();
        state
            .skills
            .get(&id)
            .cloned()
            .map(skill_row_to_dto)
            .ok_or_else(|| Self::missing("skill", id))
    }

    async fn create_skill(&self, draft: SkillDraft) -> GatewayResult<Skill> {
        let mut state = self.state.write();
        let mut row = skill_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.skills.insert(id, row.clone());
        Ok(skill_row_to_dto(row))
    }

    async fn update_skill(&self, id: i64, draft: SkillDraft) -> GatewayResult<Skill> {
        let mut state = self.state.write();
        let existing = state
            .skills
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing("skill", id))?;
        let mut row = skill_draft_to_row(&draft);
        row.id = Some(id);
        row.created_at = existing.created_at;
        row.updated_at = Some(Self::now());
        state.skills.insert(id, row.clone());
        Ok(skill_row_to_dto(row))
    }

    async fn delete_skill(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .skills
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("skill", id))
    }
}

#[async_trait]
impl EducationGateway for LocalGateway {
    async fn list_education(&self) -> GatewayResult<Vec<Education>> {
        let state = self.state.read();
        let mut items: Vec<Education> = state
            .education
            .values()
            .cloned()
            .map(education_row_to_dto)
            .collect();
        // Most recent studies first; entries without a start date sink.
        items.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_education(&self, id: i64) -> GatewayResult<Education> {
        let state = self.state.read();
        state
            .education
            .get(&id)
            .cloned()
            .map(education_row_to_dto)
            .ok_or_else(|| Self::missing("education", id))
    }

    async fn create_education(&self, draft: EducationDraft) -> GatewayResult<Education> {
        let mut state = self.state.write();
        let mut row = education_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.education.insert(id, row.clone());
        Ok(education_row_to_dto(row))
    }

    async fn update_education(
        &self,
        id: i64,
        draft: EducationDraft,
    ) -> GatewayResult<Education> {
        let mut state = self.state.write();
        let existing = state
            .education
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing("education", id))?;
        let mut row = education_draft_to_row(&draft);
        row.id = Some(id);
        row.created_at = existing.created_at;
        row.updated_at = Some(Self::now());
        state.education.insert(id, row.clone());
        Ok(education_row_to_dto(row))
    }

    async fn delete_education(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .education
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("education", id))
    }
}

#[async_trait]
impl ExperienceGateway for LocalGateway {
    async fn list_experience(&self) -> GatewayResult<Vec<Experience>> {
        let state = self.state.read();
        let mut items: Vec<Experience> = state
            .experience
            .values()
            .cloned()
            .map(experience_row_to_dto)
            .collect();
        items.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_experience(&self, id: i64) -> GatewayResult<Experience> {
        let state = self.state.read();
        state
            .experience
            .get(&id)
            .cloned()
            .map(experience_row_to_dto)
            .ok_or_else(|| Self::missing("experience", id))
    }

    async fn create_experience(&self, draft: ExperienceDraft) -> GatewayResult<Experience> {
        let mut state = self.state.write();
        let mut row = experience_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.experience.insert(id, row.clone());
        Ok(experience_row_to_dto(row))
    }

    async fn update_experience(
        &self,
        id: i64,
        draft: ExperienceDraft,
    ) -> GatewayResult<Experience> {
        let mut state = self.state.write();
        let existing = state
            .experience
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing("experience", id))?;
        let mut row = experience_draft_to_row(&draft);
        row.id = Some(id);
        row.created_at = existing.created_at;
        row.updated_at = Some(Self::now());
        state.experience.insert(id, row.clone());
        Ok(experience_row_to_dto(row))
    }

    async fn delete_experience(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .experience
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("experience", id))
    }
}

#[async_trait]
impl HobbiesGateway for LocalGateway {
    async fn list_hobbies(&self) -> GatewayResult<Vec<Hobby>> {
        let state = self.state.read();
        let mut items: Vec<Hobby> =
            state.hobbies.values().cloned().map(hobby_row_to_dto).collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_hobby(&self, id: i64) -> GatewayResult<Hobby> {
        let state = self.state.read();
        state
            .hobbies
            .get(&id)
            .cloned()
            .map(hobby_row_to_dto)
            .ok_or_else(|| Self::missing("hobby", id))
    }

    async fn create_hobby(&self, draft: HobbyDraft) -> GatewayResult<Hobby> {
        let mut state = self.state.write();
        let mut row = hobby_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.hobbies.insert(id, row.clone());
        Ok(hobby_row_to_dto(row))
    }

    async fn update_hobby(&self, id: i64, draft: HobbyDraft) -> GatewayResult<Hobby> {
        let mut state = self.state.write();
        let existing = state
            .hobbies
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing("hobby", id))?;
        let mut row = hobby_draft_to_row(&draft);
        row.id = Some(id);
        row.created_at = existing.created_at;
        row.updated_at = Some(Self::now());
        state.hobbies.insert(id, row.clone());
        Ok(hobby_row_to_dto(row))
    }

    async fn delete_hobby(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .hobbies
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("hobby", id))
    }
}

#[async_trait]
impl TestimonialsGateway for LocalGateway {
    async fn list_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        let state = self.state.read();
        let mut items: Vec<Testimonial> = state
            .testimonials
            .values()
            .cloned()
            .map(testimonial_row_to_dto)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_testimonial(&self, id: i64) -> GatewayResult<Testimonial> {
        let state = self.state.read();
        state
            .testimonials
            .get(&id)
            .cloned()
            .map(testimonial_row_to_dto)
            .ok_or_else(|| Self::missing("testimonial", id))
    }

    async fn submit_testimonial(&self, draft: TestimonialDraft) -> GatewayResult<Testimonial> {
        let mut state = self.state.write();
        let mut row = testimonial_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.testimonials.insert(id, row.clone());
        Ok(testimonial_row_to_dto(row))
    }

    async fn update_testimonial(
        &self,
        id: i64,
        draft: TestimonialDraft,
    ) -> GatewayResult<Testimonial> {
        let mut state = self.state.write();
        let existing = state
            .testimonials
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing("testimonial", id))?;
        let mut row = testimonial_draft_to_row(&draft);
        row.id = Some(id);
        // An update never silently un-approves.
        row.status = existing.status;
        row.created_at = existing.created_at;
        row.updated_at = Some(Self::now());
        state.testimonials.insert(id, row.clone());
        Ok(testimonial_row_to_dto(row))
    }

    async fn delete_testimonial(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .testimonials
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("testimonial", id))
    }

    async fn approved_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        let all = self.list_testimonials().await?;
        Ok(all.into_iter().filter(|t| t.approved()).collect())
    }

    async fn pending_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        let all = self.list_testimonials().await?;
        Ok(all
            .into_iter()
            .filter(|t| t.status == TestimonialStatus::Pending)
            .collect())
    }

    async fn approve_testimonial(&self, id: i64) -> GatewayResult<Testimonial> {
        let mut state = self.state.write();
        let row = state
            .testimonials
            .get_mut(&id)
            .ok_or_else(|| Self::missing("testimonial", id))?;
        row.status = Some(TestimonialStatus::Approved.as_str().to_string());
        row.updated_at = Some(Self::now());
        Ok(testimonial_row_to_dto(row.clone()))
    }
}

#[async_trait]
impl MessagesGateway for LocalGateway {
    async fn list_messages(&self) -> GatewayResult<Vec<Message>> {
        let state = self.state.read();
        let mut items: Vec<Message> = state
            .messages
            .values()
            .cloned()
            .map(message_row_to_dto)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_message(&self, id: i64) -> GatewayResult<Message> {
        let state = self.state.read();
        state
            .messages
            .get(&id)
            .cloned()
            .map(message_row_to_dto)
            .ok_or_else(|| Self::missing("message", id))
    }

    async fn send_message(&self, draft: MessageDraft) -> GatewayResult<MessageReceipt> {
        if draft.is_spam() {
            // Bots get the success shape and nothing is stored.
            log::info!("dropping contact message flagged by honeypot");
            return Ok(MessageReceipt { id: None });
        }
        let mut state = self.state.write();
        let mut row = message_draft_to_row(&draft);
        let id = Self::next_id(&mut state);
        row.id = Some(id);
        row.created_at = Some(Self::now());
        row.updated_at = row.created_at.clone();
        state.messages.insert(id, row);
        Ok(MessageReceipt { id: Some(id) })
    }

    async fn mark_message_read(&self, id: i64) -> GatewayResult<Message> {
        let mut state = self.state.write();
        let row = state
            .messages
            .get_mut(&id)
            .ok_or_else(|| Self::missing("message", id))?;
        row.is_read = Some(true);
        row.updated_at = Some(Self::now());
        Ok(message_row_to_dto(row.clone()))
    }

    async fn delete_message(&self, id: i64) -> GatewayResult<()> {
        let mut state = self.state.write();
        state
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("message", id))
    }
}

#[async_trait]
impl AuthGateway for LocalGateway {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let session = {
            let mut state = self.state.write();
            let wanted = email.to_lowercase();
            let user = state
                .users
                .iter()
                .find(|u| u.email == wanted && u.password == password)
                .cloned()
                .ok_or_else(|| {
                    GatewayError::api(401, "invalid login credentials")
                        .with_operation("login")
                })?;
            let session = Session {
                user: AuthUser {
                    id: user.id,
                    email: user.email,
                    role: user.role,
                },
                access_token: Some("local-token".to_string()),
            };
            state.session = Some(session.clone());
            session
        };
        self.emit(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn logout(&self) -> GatewayResult<()> {
        self.state.write().session = None;
        self.emit(SessionEvent::SignedOut);
        Ok(())
    }

    async fn current_session(&self) -> GatewayResult<Option<Session>> {
        Ok(self.state.read().session.clone())
    }

    async fn check_admin(&self, user: &AuthUser) -> GatewayResult<bool> {
        let state = self.state.read();
        if state.fail_admin_checks {
            return Err(GatewayError::transport("admin check unavailable")
                .with_operation("check_admin"));
        }
        Ok(state.admins.contains(&user.id))
    }

    fn session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl ResumeGateway for LocalGateway {
    async fn upload_resume(
        &self,
        bytes: Vec<u8>,
        language: ResumeLanguage,
    ) -> GatewayResult<()> {
        let path = self.resume.upload_path(language);
        self.state.write().resume_files.insert(path, bytes);
        Ok(())
    }

    async fn download_resume(&self, language: ResumeLanguage) -> GatewayResult<ResumeFile> {
        let state = self.state.read();
        for path in self.resume.candidates(language) {
            if let Some(bytes) = state.resume_files.get(&path) {
                let filename = path
                    .rsplit('/')
                    .next()
                    .unwrap_or(path.as_str())
                    .to_string();
                return Ok(ResumeFile {
                    filename,
                    path,
                    content_type: "application/pdf".to_string(),
                    bytes: bytes.clone(),
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
impl PortfolioGateway for LocalGateway {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn health_check(&self) -> GatewayResult<bool> {
        Ok(true)
    }
}
