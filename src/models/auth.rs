//! Session, user, and resume file types shared across backends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated user as reported by either backend. `role` is optional:
/// the legacy API returns it on `/v1/auth/me`, while direct mode may only
/// carry it in token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Option<String>,
}

impl AuthUser {
    /// True when the stored role marks this user as admin, case-insensitively.
    pub fn has_admin_role(&self) -> bool {
        self.role
            .as_deref()
            .map(|r| r.trim().eq_ignore_ascii_case("admin"))
            .unwrap_or(false)
    }
}

/// An authenticated session. The legacy backend keeps the session in a
/// server cookie, so `access_token` is `None` there; direct mode carries
/// the bearer token used for table and storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: Option<String>,
}

/// Push notification on the session channel. Emitted by the backend on
/// login, logout, and external changes such as a token refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    Refreshed(Session),
    SignedOut,
}

impl SessionEvent {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(s) | Self::Refreshed(s) => Some(s),
            Self::SignedOut => None,
        }
    }
}

/// Resume languages supported by the portfolio. Anything else normalizes
/// to English rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeLanguage {
    #[default]
    En,
    Fr,
    Es,
}

impl ResumeLanguage {
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "fr" => Self::Fr,
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    pub fn as_upper(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Fr => "FR",
            Self::Es => "ES",
        }
    }
}

impl fmt::Display for ResumeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A downloaded resume blob with the metadata the UI needs to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub filename: String,
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
