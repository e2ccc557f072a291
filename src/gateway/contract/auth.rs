//! Authentication gateway trait.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::error::GatewayResult;
use crate::models::{AuthUser, Session, SessionEvent};

/// Authentication operations, identical across backends.
///
/// The legacy backend keeps the session in a server-managed cookie; direct
/// mode holds a bearer token client-side. Either way callers receive a
/// [`Session`] and may subscribe to the push channel for external changes
/// (token refresh, sign-out from another tab).
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Authenticate with email and password.
    async fn login(&self, email: &str, password: &str) -> GatewayResult<Session>;

    /// Invalidate the current session on the backend. Local state handling
    /// is the resolver's job; this only performs the remote call.
    async fn logout(&self) -> GatewayResult<()>;

    /// The currently active session, if any.
    async fn current_session(&self) -> GatewayResult<Option<Session>>;

    /// Privileged server-side admin check for the given user. Failures are
    /// expected to be swallowed by the caller's fallback chain.
    async fn check_admin(&self, user: &AuthUser) -> GatewayResult<bool>;

    /// Subscribe to session change events. Dropping the receiver
    /// unsubscribes.
    fn session_events(&self) -> broadcast::Receiver<SessionEvent>;
}
