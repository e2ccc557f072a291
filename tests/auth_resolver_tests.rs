//! Tests for the authentication state machine against the in-memory
//! gateway.

use std::sync::Arc;
use std::time::Duration;

use portfolio_gateway::auth::{AuthResolver, AuthState};
use portfolio_gateway::gateway::backends::LocalGateway;
use portfolio_gateway::gateway::contract::AuthGateway;

fn gateway_with_user() -> (Arc<LocalGateway>, String) {
    let gw = Arc::new(LocalGateway::new());
    let user_id = gw.with_user("owner@example.com", "hunter2", None);
    (gw, user_id)
}

#[tokio::test]
async fn starts_loading_then_settles_unauthenticated() {
    let (gw, _) = gateway_with_user();
    let resolver = AuthResolver::new(gw, vec![]);
    assert_eq!(resolver.state(), AuthState::Loading);

    resolver.initialize().await.unwrap();
    assert_eq!(resolver.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn initialize_picks_up_an_existing_session() {
    let (gw, user_id) = gateway_with_user();
    gw.grant_admin(&user_id);
    gw.login("owner@example.com", "hunter2").await.unwrap();

    let resolver = AuthResolver::new(gw.clone(), vec![]);
    resolver.initialize().await.unwrap();

    let state = resolver.state();
    assert!(state.is_admin());
    assert_eq!(state.user().unwrap().email, "owner@example.com");
}

#[tokio::test]
async fn login_resolves_admin_via_backend_check() {
    let (gw, user_id) = gateway_with_user();
    gw.grant_admin(&user_id);

    let resolver = AuthResolver::new(gw, vec![]);
    resolver.initialize().await.unwrap();

    let state = resolver.login("owner@example.com", "hunter2").await.unwrap();
    assert!(state.is_admin());
}

#[tokio::test]
async fn login_without_privileges_is_plain_authenticated() {
    let (gw, _) = gateway_with_user();
    let resolver = AuthResolver::new(gw, vec![]);
    resolver.initialize().await.unwrap();

    let state = resolver.login("owner@example.com", "hunter2").await.unwrap();
    assert!(!state.is_admin());
    assert!(state.user().is_some());
}

#[tokio::test]
async fn failed_login_settles_unauthenticated() {
    let (gw, _) = gateway_with_user();
    let resolver = AuthResolver::new(gw, vec![]);
    resolver.initialize().await.unwrap();

    let result = resolver.login("owner@example.com", "wrong").await;
    assert!(result.is_err());
    assert_eq!(resolver.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn allow_list_rescues_a_failing_admin_check() {
    let (gw, _) = gateway_with_user();
    gw.fail_admin_checks(true);

    let resolver = AuthResolver::new(gw, vec!["Owner@Example.com".to_string()]);
    resolver.initialize().await.unwrap();

    let state = resolver.login("owner@example.com", "hunter2").await.unwrap();
    assert!(state.is_admin());
}

#[tokio::test]
async fn failing_admin_check_without_allow_list_means_not_admin() {
    let (gw, _) = gateway_with_user();
    gw.fail_admin_checks(true);

    let resolver = AuthResolver::new(gw, vec![]);
    resolver.initialize().await.unwrap();

    let state = resolver.login("owner@example.com", "hunter2").await.unwrap();
    assert!(!state.is_admin());
}

#[tokio::test]
async fn logout_always_lands_unauthenticated() {
    let (gw, _) = gateway_with_user();
    let resolver = AuthResolver::new(gw, vec![]);
    resolver.initialize().await.unwrap();
    resolver.login("owner@example.com", "hunter2").await.unwrap();

    resolver.logout().await;
    assert_eq!(resolver.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn pushed_session_events_update_state_without_caller_action() {
    let (gw, user_id) = gateway_with_user();
    gw.grant_admin(&user_id);

    let resolver = AuthResolver::new(gw.clone(), vec![]);
    resolver.initialize().await.unwrap();
    let mut watcher = resolver.subscribe();

    // Sign in through the gateway directly, as an external tab would.
    gw.login("owner@example.com", "hunter2").await.unwrap();

    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            watcher.changed().await.unwrap();
            if watcher.borrow().is_admin() {
                break;
            }
        }
    })
    .await
    .expect("resolver never observed the pushed sign-in");

    gw.logout().await.unwrap();
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            watcher.changed().await.unwrap();
            if *watcher.borrow() == AuthState::Unauthenticated {
                break;
            }
        }
    })
    .await
    .expect("resolver never observed the pushed sign-out");

    resolver.shutdown();
}
