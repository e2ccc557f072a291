//! Gateway configuration file support.
//!
//! This module provides utilities for reading gateway configuration from
//! TOML configuration files, as an alternative to environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::config::{parse_admin_emails, DirectMode, GatewayConfig, ResumePaths};
use super::contract::GatewayError;

/// Gateway configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayFileConfig {
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub rest: RestSettings,
    #[serde(default)]
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub resume: ResumeSettings,
}

/// Backend selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Explicit backend kind ("rest", "supabase", "local"); optional.
    #[serde(default)]
    pub backend: Option<String>,
    /// Direct-mode override; unset means auto-detect.
    #[serde(default)]
    pub direct: Option<bool>,
}

/// Legacy REST settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestSettings {
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Direct-mode connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupabaseSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

/// Auth settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Admin allow-list; entries are matched case-insensitively.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

/// Resume storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeSettings {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub file_en: Option<String>,
    #[serde(default)]
    pub file_fr: Option<String>,
    #[serde(default)]
    pub file_es: Option<String>,
}

impl GatewayFileConfig {
    /// Load gateway configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(GatewayFileConfig)` if successful
    /// * `Err(GatewayError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GatewayError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: GatewayFileConfig = toml::from_str(&content).map_err(|e| {
            GatewayError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load gateway configuration from the default location.
    ///
    /// Searches for `gateway.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, GatewayError> {
        let search_paths = vec![
            PathBuf::from("gateway.toml"),
            PathBuf::from("config/gateway.toml"),
            PathBuf::from("../gateway.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(GatewayError::configuration(
            "No gateway.toml found in standard locations",
        ))
    }

    /// Flatten into the runtime [`GatewayConfig`].
    pub fn to_gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_base_url: self.rest.base_url.clone(),
            supabase_url: self.supabase.url.clone(),
            supabase_anon_key: self.supabase.anon_key.clone(),
            direct_mode: match self.gateway.direct {
                Some(true) => DirectMode::Forced,
                Some(false) => DirectMode::Disabled,
                None => DirectMode::Auto,
            },
            backend_override: self.gateway.backend.clone(),
            admin_emails: parse_admin_emails(&self.auth.admin_emails.join(",")),
            resume: ResumePaths {
                bucket: self
                    .resume
                    .bucket
                    .clone()
                    .unwrap_or_else(|| super::config::DEFAULT_RESUME_BUCKET.to_string()),
                file_en: self.resume.file_en.clone(),
                file_fr: self.resume.file_fr.clone(),
                file_es: self.resume.file_es.clone(),
            },
        }
    }
}
