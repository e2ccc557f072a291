//! Authentication state resolution.
//!
//! [`AuthResolver`] turns gateway sessions into a single observable
//! [`AuthState`] the UI can watch. State starts as `Loading` until the
//! first resolution completes, then moves between `Authenticated` and
//! `Unauthenticated` on explicit login/logout calls and, on the direct
//! backend, on pushed session events (token refresh, external sign-out).
//!
//! Admin privilege is resolved in three steps: a role carried on the user
//! itself, then the backend's admin check, then the configured email
//! allow-list. A failing admin check degrades to the allow-list rather
//! than failing the login.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::gateway::contract::{GatewayResult, PortfolioGateway};
use crate::models::{AuthUser, Session, SessionEvent};

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// First resolution has not completed yet.
    Loading,
    Authenticated { user: AuthUser, is_admin: bool },
    Unauthenticated,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthState::Authenticated { is_admin: true, .. })
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }
}

pub struct AuthResolver {
    gateway: Arc<dyn PortfolioGateway>,
    admin_emails: Vec<String>,
    state: watch::Sender<AuthState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthResolver {
    pub fn new(gateway: Arc<dyn PortfolioGateway>, admin_emails: Vec<String>) -> Arc<Self> {
        let (state, _) = watch::channel(AuthState::Loading);
        Arc::new(AuthResolver {
            gateway,
            admin_emails: admin_emails.into_iter().map(|e| e.to_lowercase()).collect(),
            state,
            listener: Mutex::new(None),
        })
    }

    /// Watch state transitions. The receiver immediately holds the current
    /// state.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Resolve the initial state and start listening for pushed session
    /// events.
    pub async fn initialize(self: &Arc<Self>) -> GatewayResult<()> {
        match self.gateway.current_session().await {
            Ok(Some(session)) => self.apply_session(&session).await,
            Ok(None) => {
                self.state.send_replace(AuthState::Unauthenticated);
            }
            Err(e) => {
                log::warn!("initial session resolution failed: {e}");
                self.state.send_replace(AuthState::Unauthenticated);
            }
        }

        let mut events = self.gateway.session_events();
        let weak: Weak<Self> = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                let Some(resolver) = weak.upgrade() else {
                    break;
                };
                match event {
                    SessionEvent::SignedIn(session) | SessionEvent::Refreshed(session) => {
                        resolver.apply_session(&session).await;
                    }
                    SessionEvent::SignedOut => {
                        resolver.state.send_replace(AuthState::Unauthenticated);
                    }
                }
            }
        });

        let previous = self.listener.lock().replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        Ok(())
    }

    /// Log in and resolve admin privilege. On failure the state settles on
    /// `Unauthenticated` and the error propagates.
    pub async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthState> {
        match self.gateway.login(email, password).await {
            Ok(session) => {
                self.apply_session(&session).await;
                Ok(self.state())
            }
            Err(e) => {
                self.state.send_replace(AuthState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// Log out. The local transition to `Unauthenticated` happens even when
    /// session invalidation fails remotely; the UI must never stay stuck
    /// authenticated.
    pub async fn logout(&self) {
        if let Err(e) = self.gateway.logout().await {
            log::warn!("remote logout failed, clearing local state anyway: {e}");
        }
        self.state.send_replace(AuthState::Unauthenticated);
    }

    /// Stop the session-event listener.
    pub fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
        }
    }

    async fn apply_session(&self, session: &Session) {
        let is_admin = self.resolve_admin(&session.user).await;
        self.state.send_replace(AuthState::Authenticated {
            user: session.user.clone(),
            is_admin,
        });
    }

    async fn resolve_admin(&self, user: &AuthUser) -> bool {
        if user.has_admin_role() {
            return true;
        }
        match self.gateway.check_admin(user).await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => {
                log::debug!("admin check failed, falling back to allow-list: {e}");
            }
        }
        self.admin_emails.contains(&user.email.to_lowercase())
    }
}

impl Drop for AuthResolver {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
        }
    }
}
