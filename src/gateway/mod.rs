//! Gateway module: one contract, three interchangeable backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (UI, admin screens, auth resolver)   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Gateway Contract (contract/) - Abstract Interface      │
//! │  - Per-entity CRUD traits                               │
//! │  - Auth/session operations                              │
//! │  - Resume file transfer                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!   ┌─────────────────┼──────────────────┐
//!   │                 │                  │
//! ┌─▼──────────┐ ┌────▼───────────┐ ┌────▼──────┐
//! │  REST      │ │  Supabase      │ │  Local    │
//! │  (legacy   │ │  (direct table │ │  (in-     │
//! │  server)   │ │  + storage)    │ │  memory)  │
//! └────────────┘ └────────────────┘ └───────────┘
//! ```
//!
//! The module includes:
//! - `contract`: trait definitions, the error contract, and the
//!   [`PortfolioGateway`] super-trait the application programs against
//! - `backends`: the three implementations
//! - `config`: environment-driven configuration and the direct-mode
//!   tri-state selector
//! - `file_config`: optional `gateway.toml` file configuration
//! - `factory`: factory and builder for creating gateway instances
//!
//! Which backend a process talks to is decided once, at creation time, by
//! [`BackendKind::from_config`]. Both remote backends return structurally
//! identical results, callers never branch on the backend.

pub mod backends;
pub mod config;
pub mod contract;
pub mod factory;
pub mod file_config;

pub use backends::{LocalGateway, RestGateway, SupabaseGateway};
pub use config::{parse_admin_emails, DirectMode, GatewayConfig, ResumePaths};
pub use contract::{
    AuthGateway, EducationGateway, ErrorContext, ExperienceGateway, GatewayError,
    GatewayResult, HobbiesGateway, MessagesGateway, PortfolioGateway, ProjectsGateway,
    ResumeGateway, SkillsGateway, TestimonialsGateway,
};
pub use factory::{BackendKind, GatewayBuilder, GatewayFactory};
pub use file_config::GatewayFileConfig;

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global gateway instance initialized once per process.
static GATEWAY: OnceLock<Arc<dyn PortfolioGateway>> = OnceLock::new();

/// Initialize the global gateway singleton from environment configuration.
///
/// Safe to call more than once; only the first call creates anything.
pub fn init_gateway() -> Result<()> {
    if GATEWAY.get().is_some() {
        return Ok(());
    }

    let gateway = GatewayFactory::from_env().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = GATEWAY.set(gateway);
    Ok(())
}

/// Get a reference to the global gateway instance.
pub fn gateway() -> Result<&'static Arc<dyn PortfolioGateway>> {
    if GATEWAY.get().is_none() {
        let _ = init_gateway();
    }

    GATEWAY
        .get()
        .context("Gateway not initialized. Call init_gateway() first.")
}
