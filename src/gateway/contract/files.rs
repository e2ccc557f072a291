//! Resume file gateway trait.

use async_trait::async_trait;

use super::error::GatewayResult;
use crate::models::{ResumeFile, ResumeLanguage};

/// Resume storage operations. Not row-based: resumes live as binary blobs
/// under language-derived paths, either behind the legacy multipart/binary
/// endpoints or in an object-storage bucket.
#[async_trait]
pub trait ResumeGateway: Send + Sync {
    /// Store the resume PDF for a language, replacing any previous file.
    async fn upload_resume(&self, bytes: Vec<u8>, language: ResumeLanguage)
        -> GatewayResult<()>;

    /// Retrieve the resume for a language. Direct mode probes a small
    /// ordered list of candidate paths (configured override, default
    /// pattern, legacy naming) and returns the first that resolves.
    async fn download_resume(&self, language: ResumeLanguage) -> GatewayResult<ResumeFile>;
}
