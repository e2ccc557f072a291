//! Legacy REST backend.
//!
//! Talks to the original server API: conventional resource paths with JSON
//! bodies wrapped in a `{ "data": ... }` envelope, a cookie-based session,
//! and CSRF header propagation. The DTOs already carry the wire shape, so
//! this backend is mostly routing.

mod client;

pub use client::RestClient;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::gateway::config::GatewayConfig;
use crate::gateway::contract::{
    AuthGateway, EducationGateway, ExperienceGateway, GatewayError, GatewayResult,
    HobbiesGateway, MessagesGateway, PortfolioGateway, ProjectsGateway, ResumeGateway,
    SkillsGateway, TestimonialsGateway,
};
use crate::models::{
    AuthUser, Education, EducationDraft, Experience, ExperienceDraft, Hobby, HobbyDraft,
    Message, MessageDraft, MessageReceipt, Project, ProjectDraft, ResumeFile, ResumeLanguage,
    Session, SessionEvent, Skill, SkillDraft, Testimonial, TestimonialDraft,
};

/// User payload returned by `/v1/auth/login` and `/v1/auth/me`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPayload {
    id: serde_json::Value,
    email: String,
    #[serde(default)]
    role: Option<String>,
}

impl UserPayload {
    fn into_user(self) -> AuthUser {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        AuthUser {
            id,
            email: self.email,
            role: self.role,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The legacy contact endpoint predates the localized field names.
#[derive(Debug, Serialize)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

pub struct RestGateway {
    client: RestClient,
    resume: crate::gateway::config::ResumePaths,
    events: broadcast::Sender<SessionEvent>,
}

impl RestGateway {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = RestClient::new(&config.api_base_url())?;
        let (events, _) = broadcast::channel(16);
        Ok(RestGateway {
            client,
            resume: config.resume.clone(),
            events,
        })
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    async fn me(&self) -> GatewayResult<AuthUser> {
        let payload: UserPayload = self.client.get_json("v1/auth/me").await?;
        Ok(payload.into_user())
    }
}

#[async_trait]
impl ProjectsGateway for RestGateway {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        self.client.get_json("projects").await
    }

    async fn get_project(&self, id: i64) -> GatewayResult<Project> {
        self.client.get_json(&format!("projects/{id}")).await
    }

    async fn create_project(&self, draft: ProjectDraft) -> GatewayResult<Project> {
        self.client.post_json("projects", &draft).await
    }

    async fn update_project(&self, id: i64, draft: ProjectDraft) -> GatewayResult<Project> {
        self.client.put_json(&format!("projects/{id}"), &draft).await
    }

    async fn delete_project(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("projects/{id}")).await
    }
}

#[async_trait]
impl SkillsGateway for RestGateway {
    async fn list_skills(&self) -> GatewayResult<Vec<Skill>> {
        self.client.get_json("skills").await
    }

    async fn get_skill(&self, id: i64) -> GatewayResult<Skill> {
        self.client.get_json(&format!("skills/{id}")).await
    }

    async fn create_skill(&self, draft: SkillDraft) -> GatewayResult<Skill> {
        self.client.post_json("skills", &draft).await
    }

    async fn update_skill(&self, id: i64, draft: SkillDraft) -> GatewayResult<Skill> {
        self.client.put_json(&format!("skills/{id}"), &draft).await
    }

    async fn delete_skill(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("skills/{id}")).await
    }
}

#[async_trait]
impl EducationGateway for RestGateway {
    async fn list_education(&self) -> GatewayResult<Vec<Education>> {
        self.client.get_json("education").await
    }

    async fn get_education(&self, id: i64) -> GatewayResult<Education> {
        self.client.get_json(&format!("education/{id}")).await
    }

    async fn create_education(&self, draft: EducationDraft) -> GatewayResult<Education> {
        self.client.post_json("education", &draft).await
    }

    async fn update_education(
        &self,
        id: i64,
        draft: EducationDraft,
    ) -> GatewayResult<Education> {
        self.client.put_json(&format!("education/{id}"), &draft).await
    }

    async fn delete_education(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("education/{id}")).await
    }
}

#[async_trait]
impl ExperienceGateway for RestGateway {
    async fn list_experience(&self) -> GatewayResult<Vec<Experience>> {
        self.client.get_json("experience").await
    }

    async fn get_experience(&self, id: i64) -> GatewayResult<Experience> {
        self.client.get_json(&format!("experience/{id}")).await
    }

    async fn create_experience(&self, draft: ExperienceDraft) -> GatewayResult<Experience> {
        self.client.post_json("experience", &draft).await
    }

    async fn update_experience(
        &self,
        id: i64,
        draft: ExperienceDraft,
    ) -> GatewayResult<Experience> {
        self.client.put_json(&format!("experience/{id}"), &draft).await
    }

    async fn delete_experience(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("experience/{id}")).await
    }
}

#[async_trait]
impl HobbiesGateway for RestGateway {
    async fn list_hobbies(&self) -> GatewayResult<Vec<Hobby>> {
        self.client.get_json("hobbies").await
    }

    async fn get_hobby(&self, id: i64) -> GatewayResult<Hobby> {
        self.client.get_json(&format!("hobbies/{id}")).await
    }

    async fn create_hobby(&self, draft: HobbyDraft) -> GatewayResult<Hobby> {
        self.client.post_json("hobbies", &draft).await
    }

    async fn update_hobby(&self, id: i64, draft: HobbyDraft) -> GatewayResult<Hobby> {
        self.client.put_json(&format!("hobbies/{id}"), &draft).await
    }

    async fn delete_hobby(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("hobbies/{id}")).await
    }
}

#[async_trait]
impl TestimonialsGateway for RestGateway {
    async fn list_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        self.client.get_json("testimonials").await
    }

    async fn get_testimonial(&self, id: i64) -> GatewayResult<Testimonial> {
        self.client.get_json(&format!("testimonials/{id}")).await
    }

    async fn submit_testimonial(&self, draft: TestimonialDraft) -> GatewayResult<Testimonial> {
        self.client.post_json("testimonials", &draft).await
    }

    async fn update_testimonial(
        &self,
        id: i64,
        draft: TestimonialDraft,
    ) -> GatewayResult<Testimonial> {
        self.client
            .put_json(&format!("testimonials/{id}"), &draft)
            .await
    }

    async fn delete_testimonial(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("testimonials/{id}")).await
    }

    async fn approved_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        // The server already hides unapproved entries from the public list,
        // but older deployments returned everything. Filter locally so both
        // behave the same.
        let all: Vec<Testimonial> = self.client.get_json("testimonials").await?;
        Ok(all.into_iter().filter(|t| t.approved()).collect())
    }

    async fn pending_testimonials(&self) -> GatewayResult<Vec<Testimonial>> {
        self.client.get_json("testimonials/pending").await
    }

    async fn approve_testimonial(&self, id: i64) -> GatewayResult<Testimonial> {
        self.client
            .patch_json(&format!("testimonials/{id}/approve"))
            .await
    }
}

#[async_trait]
impl MessagesGateway for RestGateway {
    async fn list_messages(&self) -> GatewayResult<Vec<Message>> {
        self.client.get_json("messages").await
    }

    async fn get_message(&self, id: i64) -> GatewayResult<Message> {
        self.client.get_json(&format!("messages/{id}")).await
    }

    async fn send_message(&self, draft: MessageDraft) -> GatewayResult<MessageReceipt> {
        if draft.is_spam() {
            log::info!("dropping contact message flagged by honeypot");
            return Ok(MessageReceipt { id: None });
        }
        let request = ContactRequest {
            name: &draft.sender_name,
            email: &draft.sender_email,
            subject: &draft.subject,
            message: &draft.message,
        };
        self.client.post_json("messages", &request).await
    }

    async fn mark_message_read(&self, id: i64) -> GatewayResult<Message> {
        self.client
            .patch_json(&format!("messages/{id}/mark-read"))
            .await
    }

    async fn delete_message(&self, id: i64) -> GatewayResult<()> {
        self.client.delete(&format!("messages/{id}")).await
    }
}

#[async_trait]
impl AuthGateway for RestGateway {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let payload: UserPayload = self
            .client
            .post_json("v1/auth/login", &LoginRequest { email, password })
            .await?;
        // The session itself lives in cookies; there is no bearer token.
        let session = Session {
            user: payload.into_user(),
            access_token: None,
        };
        self.emit(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn logout(&self) -> GatewayResult<()> {
        let result = self.client.post_empty("v1/auth/logout").await;
        self.emit(SessionEvent::SignedOut);
        result
    }

    async fn current_session(&self) -> GatewayResult<Option<Session>> {
        match self.me().await {
            Ok(user) => Ok(Some(Session {
                user,
                access_token: None,
            })),
            // No cookie session means anonymous, not an error.
            Err(e) if matches!(e.status(), Some(401) | Some(403)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn check_admin(&self, _user: &AuthUser) -> GatewayResult<bool> {
        // The server is authoritative about the role of the cookie session.
        let user = self.me().await?;
        Ok(user.has_admin_role())
    }

    fn session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl ResumeGateway for RestGateway {
    async fn upload_resume(
        &self,
        bytes: Vec<u8>,
        language: ResumeLanguage,
    ) -> GatewayResult<()> {
        let filename = self.resume.upload_path(language);
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")
            .map_err(|e| GatewayError::internal(format!("multipart part: {e}")))?;
        let form = Form::new()
            .part("file", part)
            .text("language", language.as_str());
        let _: serde_json::Value = self
            .client
            .post_multipart("v1/files/resume/upload", form)
            .await?;
        Ok(())
    }

    async fn download_resume(&self, language: ResumeLanguage) -> GatewayResult<ResumeFile> {
        let path = format!("v1/files/resume/download?language={language}");
        let download = self.client.get_bytes(&path).await?;
        let fallback = self.resume.upload_path(language);
        let filename = download.filename.unwrap_or_else(|| fallback.clone());
        Ok(ResumeFile {
            path: fallback,
            filename,
            content_type: download
                .content_type
                .unwrap_or_else(|| "application/pdf".to_string()),
            bytes: download.bytes,
        })
    }
}

#[async_trait]
impl PortfolioGateway for RestGateway {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn health_check(&self) -> GatewayResult<bool> {
        let download = self.client.get_bytes("v1/auth/health").await;
        Ok(download.is_ok())
    }
}
