//! Gateway configuration and environment variable handling.
//!
//! Configuration is read once at startup; the backend choice derived from
//! it is never re-evaluated afterwards (no hot-reload of the wire
//! protocol).

use std::env;

use super::contract::{GatewayError, GatewayResult};
use crate::models::ResumeLanguage;

/// Default base URL for the legacy REST API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Default object-storage bucket holding resume files.
pub const DEFAULT_RESUME_BUCKET: &str = "resumes";

/// Tri-state direct-mode override read from `SUPABASE_DIRECT`.
///
/// - `Disabled` ("false"): legacy REST regardless of credential presence.
/// - `Forced` ("true"): direct mode, but missing credentials are a loud
///   configuration error, never a silent fallback.
/// - `Auto` (unset or anything else): direct mode exactly when both
///   credentials are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectMode {
    Forced,
    Disabled,
    #[default]
    Auto,
}

impl DirectMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "true" => Self::Forced,
            "false" => Self::Disabled,
            _ => Self::Auto,
        }
    }

    /// Resolve the override against credential presence.
    ///
    /// # Errors
    /// `GatewayError::Configuration` when direct mode is forced on without
    /// credentials.
    pub fn resolve(&self, credentials_present: bool) -> GatewayResult<bool> {
        match self {
            Self::Disabled => Ok(false),
            Self::Auto => Ok(credentials_present),
            Self::Forced => {
                if credentials_present {
                    Ok(true)
                } else {
                    Err(GatewayError::configuration(
                        "Direct mode is forced on (SUPABASE_DIRECT=true) but SUPABASE_URL \
                         and SUPABASE_ANON_KEY are not both set",
                    ))
                }
            }
        }
    }
}

/// Per-language resume storage paths, with the candidate list probed on
/// download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePaths {
    pub bucket: String,
    pub file_en: Option<String>,
    pub file_fr: Option<String>,
    pub file_es: Option<String>,
}

impl Default for ResumePaths {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_RESUME_BUCKET.to_string(),
            file_en: None,
            file_fr: None,
            file_es: None,
        }
    }
}

impl ResumePaths {
    /// The path uploads are written to: the configured override when set,
    /// otherwise the default `resume_{lang}.pdf` pattern.
    pub fn upload_path(&self, language: ResumeLanguage) -> String {
        self.configured(language)
            .map(str::to_string)
            .unwrap_or_else(|| format!("resume_{}.pdf", language))
    }

    /// Ordered candidate paths probed on download: configured override,
    /// default pattern, then the legacy `CV_JD_{LANG}.pdf` naming kept for
    /// files uploaded before the rename. Duplicates are dropped while
    /// preserving order.
    pub fn candidates(&self, language: ResumeLanguage) -> Vec<String> {
        let mut paths: Vec<String> = Vec::with_capacity(3);
        if let Some(configured) = self.configured(language) {
            paths.push(configured.to_string());
        }
        for candidate in [
            format!("resume_{}.pdf", language),
            format!("CV_JD_{}.pdf", language.as_upper()),
        ] {
            if !paths.contains(&candidate) {
                paths.push(candidate);
            }
        }
        paths
    }

    fn configured(&self, language: ResumeLanguage) -> Option<&str> {
        let value = match language {
            ResumeLanguage::En => &self.file_en,
            ResumeLanguage::Fr => &self.file_fr,
            ResumeLanguage::Es => &self.file_es,
        };
        value.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Base URL of the legacy REST API
    pub api_base_url: Option<String>,
    /// Database-service project URL
    pub supabase_url: Option<String>,
    /// Database-service public (anon) key
    pub supabase_anon_key: Option<String>,
    /// Tri-state direct-mode override
    pub direct_mode: DirectMode,
    /// Explicit backend kind override (dev/test), from `PORTFOLIO_BACKEND`
    pub backend_override: Option<String>,
    /// Admin email allow-list, lowercased
    pub admin_emails: Vec<String>,
    /// Resume bucket and per-language path overrides
    pub resume: ResumePaths,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `PORTFOLIO_API_BASE_URL` (optional): legacy REST base URL
    ///   (default: `http://localhost:8080/api`)
    /// - `SUPABASE_URL`, `SUPABASE_ANON_KEY` (optional): direct-mode
    ///   credentials
    /// - `SUPABASE_DIRECT` (optional): `true` | `false` | unset (auto)
    /// - `PORTFOLIO_BACKEND` (optional): explicit `rest` | `supabase` |
    ///   `local`
    /// - `ADMIN_EMAILS` (optional): comma-separated admin allow-list
    /// - `RESUME_BUCKET` (optional, default `resumes`)
    /// - `RESUME_FILE_EN` / `RESUME_FILE_FR` / `RESUME_FILE_ES` (optional):
    ///   per-language storage path overrides
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_base_url: non_empty("PORTFOLIO_API_BASE_URL"),
            supabase_url: non_empty("SUPABASE_URL"),
            supabase_anon_key: non_empty("SUPABASE_ANON_KEY"),
            direct_mode: env::var("SUPABASE_DIRECT")
                .map(|v| DirectMode::parse(&v))
                .unwrap_or_default(),
            backend_override: non_empty("PORTFOLIO_BACKEND"),
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            resume: ResumePaths {
                bucket: non_empty("RESUME_BUCKET")
                    .unwrap_or_else(|| DEFAULT_RESUME_BUCKET.to_string()),
                file_en: non_empty("RESUME_FILE_EN"),
                file_fr: non_empty("RESUME_FILE_FR"),
                file_es: non_empty("RESUME_FILE_ES"),
            },
        }
    }

    /// The legacy REST base URL, defaulted.
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// True when both direct-mode credentials are present.
    pub fn has_supabase_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }

    /// Whether direct mode is active, applying the tri-state override.
    ///
    /// # Errors
    /// `GatewayError::Configuration` when forced on without credentials.
    pub fn direct_mode_active(&self) -> GatewayResult<bool> {
        self.direct_mode.resolve(self.has_supabase_credentials())
    }

    /// True when `email` is on the admin allow-list, case-insensitively.
    pub fn is_allow_listed(&self, email: &str) -> bool {
        let needle = email.trim().to_lowercase();
        self.admin_emails.iter().any(|e| *e == needle)
    }
}

/// Parse the comma-separated admin allow-list, trimming and lowercasing.
pub fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_mode_parse() {
        assert_eq!(DirectMode::parse("true"), DirectMode::Forced);
        assert_eq!(DirectMode::parse(" TRUE "), DirectMode::Forced);
        assert_eq!(DirectMode::parse("false"), DirectMode::Disabled);
        assert_eq!(DirectMode::parse(""), DirectMode::Auto);
        assert_eq!(DirectMode::parse("yes"), DirectMode::Auto);
    }

    #[test]
    fn disabled_wins_over_credentials() {
        assert!(!DirectMode::Disabled.resolve(true).unwrap());
        assert!(!DirectMode::Disabled.resolve(false).unwrap());
    }

    #[test]
    fn forced_without_credentials_fails_loud() {
        let err = DirectMode::Forced.resolve(false).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
        assert!(DirectMode::Forced.resolve(true).unwrap());
    }

    #[test]
    fn auto_follows_credentials() {
        assert!(DirectMode::Auto.resolve(true).unwrap());
        assert!(!DirectMode::Auto.resolve(false).unwrap());
    }

    #[test]
    fn admin_email_list_parsing() {
        let emails = parse_admin_emails("Admin@Example.com, other@example.com ,,");
        assert_eq!(emails, vec!["admin@example.com", "other@example.com"]);
    }

    #[test]
    fn allow_list_is_case_insensitive() {
        let config = GatewayConfig {
            admin_emails: parse_admin_emails("admin@example.com"),
            ..Default::default()
        };
        assert!(config.is_allow_listed("ADMIN@example.COM"));
        assert!(!config.is_allow_listed("user@example.com"));
    }

    #[test]
    fn resume_candidates_order_and_dedup() {
        let paths = ResumePaths {
            file_fr: Some("cv-francais.pdf".into()),
            ..Default::default()
        };
        assert_eq!(
            paths.candidates(ResumeLanguage::Fr),
            vec!["cv-francais.pdf", "resume_fr.pdf", "CV_JD_FR.pdf"]
        );
        // Without an override the default pattern leads.
        assert_eq!(
            paths.candidates(ResumeLanguage::En),
            vec!["resume_en.pdf", "CV_JD_EN.pdf"]
        );
        // Override equal to the default collapses to two entries.
        let paths = ResumePaths {
            file_en: Some("resume_en.pdf".into()),
            ..Default::default()
        };
        assert_eq!(
            paths.candidates(ResumeLanguage::En),
            vec!["resume_en.pdf", "CV_JD_EN.pdf"]
        );
    }

    #[test]
    fn upload_path_prefers_override() {
        let paths = ResumePaths {
            file_es: Some("cv_es.pdf".into()),
            ..Default::default()
        };
        assert_eq!(paths.upload_path(ResumeLanguage::Es), "cv_es.pdf");
        assert_eq!(paths.upload_path(ResumeLanguage::Fr), "resume_fr.pdf");
    }
}
