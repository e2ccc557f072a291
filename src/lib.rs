//! # Portfolio Gateway
//!
//! Backend-agnostic data access layer for a personal-portfolio application.
//!
//! Every content screen of the portfolio (projects, skills, education,
//! experience, hobbies, testimonials, contact messages, resume files) talks
//! to this crate, which in turn talks to one of two interchangeable
//! backends selected once at startup:
//!
//! - **Legacy REST**: a conventional JSON API with cookie-based sessions
//!   and CSRF-header protection.
//! - **Direct mode**: a database-as-a-service backend (PostgREST table
//!   operations, GoTrue auth, object storage) reached straight from the
//!   client.
//!
//! A third, in-memory backend backs unit tests and local development.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Callers (UI layer, tests)                               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  AuthResolver (src/auth) — session state machine         │
//! │  Validation  (src/validation) — pre-submit field checks  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  PortfolioGateway trait (src/gateway/contract)           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//!     ┌───────────────┼───────────────────┐
//! ┌───▼────────┐ ┌────▼────────────┐ ┌────▼────────┐
//! │ RestGateway│ │ SupabaseGateway │ │ LocalGateway│
//! │ (legacy)   │ │ (direct mode)   │ │ (in-memory) │
//! └────────────┘ └─────────────────┘ └─────────────┘
//! ```
//!
//! The backend is chosen by [`gateway::factory`] from configuration
//! (environment variables or a `gateway.toml` file) and never re-evaluated
//! afterwards.

pub mod auth;
pub mod gateway;
pub mod models;
pub mod validation;

pub use auth::{AuthResolver, AuthState};
pub use gateway::contract::{GatewayError, GatewayResult, PortfolioGateway};
pub use gateway::factory::{BackendKind, GatewayBuilder, GatewayFactory};
pub use gateway::GatewayConfig;
pub use validation::{validate_contact, validate_testimonial, ValidationError, ValidationErrors};
