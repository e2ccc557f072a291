//! The gateway contract: per-entity traits composed into one object-safe
//! interface.
//!
//! Backends implement every sub-trait; callers hold an
//! `Arc<dyn PortfolioGateway>` chosen once by the factory and stay
//! agnostic of the wire protocol behind it.

pub mod auth;
pub mod content;
pub mod error;
pub mod files;

use async_trait::async_trait;

pub use auth::AuthGateway;
pub use content::{
    EducationGateway, ExperienceGateway, HobbiesGateway, MessagesGateway, ProjectsGateway,
    SkillsGateway, TestimonialsGateway,
};
pub use error::{ErrorContext, GatewayError, GatewayResult};
pub use files::ResumeGateway;

/// The full gateway contract: all content entities, messages, resume
/// files, and authentication.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait PortfolioGateway:
    ProjectsGateway
    + SkillsGateway
    + EducationGateway
    + ExperienceGateway
    + HobbiesGateway
    + TestimonialsGateway
    + MessagesGateway
    + ResumeGateway
    + AuthGateway
    + Send
    + Sync
{
    /// Short name of the backing protocol, for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> GatewayResult<bool>;
}
