//! Gateway factory for dependency injection.
//!
//! This module provides utilities for creating and configuring gateway
//! instances based on runtime configuration. Backend selection is a runtime
//! decision, the same build serves deployments with or without direct
//! database credentials.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::backends::{LocalGateway, RestGateway, SupabaseGateway};
use super::config::GatewayConfig;
use super::contract::{GatewayError, GatewayResult, PortfolioGateway};
use super::file_config::GatewayFileConfig;

/// Backend kind configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Legacy REST API
    Rest,
    /// Direct database-as-a-service
    Supabase,
    /// In-memory gateway
    Local,
}

impl FromStr for BackendKind {
    type Err = String;

    /// Parse backend kind from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("rest", "supabase", "local")
    ///
    /// # Returns
    /// * `Ok(BackendKind)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" | "legacy" | "api" => Ok(Self::Rest),
            "supabase" | "direct" => Ok(Self::Supabase),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown backend kind: {}", s)),
        }
    }
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Supabase => "supabase",
            Self::Local => "local",
        }
    }

    /// Resolve the backend from configuration.
    ///
    /// An explicit override wins; otherwise the direct-mode tri-state
    /// decides between the direct and legacy paths (forced direct without
    /// credentials is a configuration error).
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        if let Some(raw) = config.backend_override.as_deref() {
            return raw
                .parse()
                .map_err(|e: String| GatewayError::configuration(e));
        }
        if config.direct_mode_active()? {
            Ok(Self::Supabase)
        } else {
            Ok(Self::Rest)
        }
    }

    /// Resolve the backend from environment configuration.
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_config(&GatewayConfig::from_env())
    }
}

/// Gateway factory for creating gateway instances.
///
/// This factory provides a centralized way to create gateway instances
/// with proper initialization and configuration.
///
/// # Example
/// ```ignore
/// use portfolio_gateway::{BackendKind, GatewayConfig, GatewayFactory};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = GatewayConfig::from_env();
///     let gateway = GatewayFactory::create(BackendKind::from_config(&config)?, &config)?;
///     let projects = gateway.list_projects().await?;
///     Ok(())
/// }
/// ```
pub struct GatewayFactory;

impl GatewayFactory {
    /// Create a gateway instance of the given kind.
    ///
    /// # Arguments
    /// * `kind` - Backend to instantiate
    /// * `config` - Gateway configuration
    ///
    /// # Returns
    /// * `Ok(Arc<dyn PortfolioGateway>)` - Gateway instance
    /// * `Err(GatewayError)` - If creation fails
    pub fn create(
        kind: BackendKind,
        config: &GatewayConfig,
    ) -> GatewayResult<Arc<dyn PortfolioGateway>> {
        let gateway: Arc<dyn PortfolioGateway> = match kind {
            BackendKind::Rest => Arc::new(RestGateway::new(config)?),
            BackendKind::Supabase => Arc::new(SupabaseGateway::new(config)?),
            BackendKind::Local => Arc::new(LocalGateway::with_config(config)),
        };
        log::info!("gateway backend selected: {}", gateway.backend_name());
        Ok(gateway)
    }

    /// Create an in-memory gateway with default configuration.
    pub fn create_local() -> Arc<dyn PortfolioGateway> {
        Arc::new(LocalGateway::new())
    }

    /// Create a gateway from environment configuration.
    ///
    /// Reads `PORTFOLIO_BACKEND` for an explicit choice; otherwise the
    /// `SUPABASE_DIRECT` tri-state and the presence of credentials decide.
    pub fn from_env() -> GatewayResult<Arc<dyn PortfolioGateway>> {
        let config = GatewayConfig::from_env();
        let kind = BackendKind::from_config(&config)?;
        Self::create(kind, &config)
    }

    /// Create a gateway from a TOML configuration file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the gateway.toml configuration file
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> GatewayResult<Arc<dyn PortfolioGateway>> {
        let file = GatewayFileConfig::from_file(config_path)?;
        let config = file.to_gateway_config();
        let kind = BackendKind::from_config(&config)?;
        Self::create(kind, &config)
    }

    /// Create a gateway from the default configuration file location.
    ///
    /// Searches for `gateway.toml` in standard locations.
    pub fn from_default_config() -> GatewayResult<Arc<dyn PortfolioGateway>> {
        let file = GatewayFileConfig::from_default_location()?;
        let config = file.to_gateway_config();
        let kind = BackendKind::from_config(&config)?;
        Self::create(kind, &config)
    }
}

/// Builder for configuring gateway creation.
///
/// This provides a fluent API for configuring and creating gateway
/// instances.
///
/// # Example
/// ```ignore
/// use portfolio_gateway::{BackendKind, GatewayBuilder};
///
/// let gateway = GatewayBuilder::new()
///     .backend(BackendKind::Supabase)
///     .supabase_credentials("https://x.supabase.co", "anon-key")
///     .build()?;
/// ```
pub struct GatewayBuilder {
    kind: Option<BackendKind>,
    config: GatewayConfig,
}

impl GatewayBuilder {
    /// Create a builder seeded from environment configuration.
    pub fn new() -> Self {
        Self {
            kind: None,
            config: GatewayConfig::from_env(),
        }
    }

    /// Start from an explicit configuration instead of the environment.
    pub fn with_config(config: GatewayConfig) -> Self {
        Self { kind: None, config }
    }

    /// Pin the backend kind, bypassing the selector.
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the legacy REST base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = Some(url.into());
        self
    }

    /// Set the direct-mode credentials.
    pub fn supabase_credentials(
        mut self,
        url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        self.config.supabase_url = Some(url.into());
        self.config.supabase_anon_key = Some(anon_key.into());
        self
    }

    /// Set the admin email allow-list.
    pub fn admin_emails(mut self, emails: Vec<String>) -> Self {
        self.config.admin_emails = emails.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Build the gateway.
    pub fn build(self) -> GatewayResult<Arc<dyn PortfolioGateway>> {
        let kind = match self.kind {
            Some(kind) => kind,
            None => BackendKind::from_config(&self.config)?,
        };
        GatewayFactory::create(kind, &self.config)
    }

    /// The configuration the builder currently holds.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::config::DirectMode;

    #[test]
    fn backend_kind_parses_aliases() {
        assert_eq!("rest".parse::<BackendKind>().unwrap(), BackendKind::Rest);
        assert_eq!("LEGACY".parse::<BackendKind>().unwrap(), BackendKind::Rest);
        assert_eq!(
            "direct".parse::<BackendKind>().unwrap(),
            BackendKind::Supabase
        );
        assert_eq!("memory".parse::<BackendKind>().unwrap(), BackendKind::Local);
        assert!("mongo".parse::<BackendKind>().is_err());
    }

    #[test]
    fn explicit_override_wins_over_selector() {
        let config = GatewayConfig {
            backend_override: Some("local".to_string()),
            supabase_url: Some("https://x.supabase.co".to_string()),
            supabase_anon_key: Some("anon".to_string()),
            direct_mode: DirectMode::Forced,
            ..Default::default()
        };
        assert_eq!(BackendKind::from_config(&config).unwrap(), BackendKind::Local);
    }

    #[test]
    fn auto_mode_picks_supabase_when_credentials_present() {
        let config = GatewayConfig {
            supabase_url: Some("https://x.supabase.co".to_string()),
            supabase_anon_key: Some("anon".to_string()),
            ..Default::default()
        };
        assert_eq!(
            BackendKind::from_config(&config).unwrap(),
            BackendKind::Supabase
        );
    }

    #[test]
    fn auto_mode_falls_back_to_rest_without_credentials() {
        let config = GatewayConfig::default();
        assert_eq!(BackendKind::from_config(&config).unwrap(), BackendKind::Rest);
    }

    #[test]
    fn forced_direct_without_credentials_is_an_error() {
        let config = GatewayConfig {
            direct_mode: DirectMode::Forced,
            ..Default::default()
        };
        assert!(BackendKind::from_config(&config).is_err());
    }

    #[test]
    fn builder_pins_backend() {
        let gateway = GatewayBuilder::with_config(GatewayConfig::default())
            .backend(BackendKind::Local)
            .build()
            .unwrap();
        assert_eq!(gateway.backend_name(), "local");
    }
}
