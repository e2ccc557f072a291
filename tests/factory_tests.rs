//! Tests for gateway::factory - backend selection and gateway creation.

mod support;

use std::str::FromStr;

use portfolio_gateway::gateway::config::GatewayConfig;
use portfolio_gateway::{BackendKind, GatewayBuilder, GatewayFactory};

#[test]
fn test_backend_kind_from_str_rest() {
    assert_eq!(BackendKind::from_str("rest").unwrap(), BackendKind::Rest);
    assert_eq!(BackendKind::from_str("REST").unwrap(), BackendKind::Rest);
    assert_eq!(BackendKind::from_str("legacy").unwrap(), BackendKind::Rest);
    assert_eq!(BackendKind::from_str("api").unwrap(), BackendKind::Rest);
}

#[test]
fn test_backend_kind_from_str_supabase() {
    assert_eq!(
        BackendKind::from_str("supabase").unwrap(),
        BackendKind::Supabase
    );
    assert_eq!(
        BackendKind::from_str("direct").unwrap(),
        BackendKind::Supabase
    );
}

#[test]
fn test_backend_kind_from_str_local() {
    assert_eq!(BackendKind::from_str("local").unwrap(), BackendKind::Local);
    assert_eq!(BackendKind::from_str("MEMORY").unwrap(), BackendKind::Local);
}

#[test]
fn test_backend_kind_from_str_invalid() {
    let result = BackendKind::from_str("mysql");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown backend kind"));
}

#[test]
fn test_backend_kind_from_env_defaults_to_rest() {
    support::with_scoped_env(
        &[
            ("PORTFOLIO_BACKEND", None),
            ("SUPABASE_URL", None),
            ("SUPABASE_ANON_KEY", None),
            ("SUPABASE_DIRECT", None),
        ],
        || {
            assert_eq!(BackendKind::from_env().unwrap(), BackendKind::Rest);
        },
    );
}

#[test]
fn test_backend_kind_from_env_credentials_switch_to_supabase() {
    support::with_scoped_env(
        &[
            ("PORTFOLIO_BACKEND", None),
            ("SUPABASE_URL", Some("https://x.supabase.co")),
            ("SUPABASE_ANON_KEY", Some("anon")),
            ("SUPABASE_DIRECT", None),
        ],
        || {
            assert_eq!(BackendKind::from_env().unwrap(), BackendKind::Supabase);
        },
    );
}

#[test]
fn test_backend_kind_from_env_explicit_override() {
    support::with_scoped_env(
        &[
            ("PORTFOLIO_BACKEND", Some("local")),
            ("SUPABASE_URL", Some("https://x.supabase.co")),
            ("SUPABASE_ANON_KEY", Some("anon")),
            ("SUPABASE_DIRECT", None),
        ],
        || {
            assert_eq!(BackendKind::from_env().unwrap(), BackendKind::Local);
        },
    );
}

#[test]
fn test_factory_creates_each_backend() {
    let config = GatewayConfig {
        supabase_url: Some("https://x.supabase.co".to_string()),
        supabase_anon_key: Some("anon".to_string()),
        ..Default::default()
    };

    let rest = GatewayFactory::create(BackendKind::Rest, &config).unwrap();
    assert_eq!(rest.backend_name(), "rest");

    let supabase = GatewayFactory::create(BackendKind::Supabase, &config).unwrap();
    assert_eq!(supabase.backend_name(), "supabase");

    let local = GatewayFactory::create(BackendKind::Local, &config).unwrap();
    assert_eq!(local.backend_name(), "local");
}

#[test]
fn test_factory_supabase_requires_credentials() {
    let config = GatewayConfig::default();
    assert!(GatewayFactory::create(BackendKind::Supabase, &config).is_err());
}

#[test]
fn test_factory_create_local() {
    let gateway = GatewayFactory::create_local();
    assert_eq!(gateway.backend_name(), "local");
}

#[test]
fn test_factory_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.toml");
    std::fs::write(
        &path,
        r#"
[gateway]
backend = "local"

[auth]
admin_emails = ["admin@example.com"]
"#,
    )
    .unwrap();

    let gateway = GatewayFactory::from_config_file(&path).unwrap();
    assert_eq!(gateway.backend_name(), "local");
}

#[test]
fn test_factory_from_config_file_missing() {
    assert!(GatewayFactory::from_config_file("/nonexistent/gateway.toml").is_err());
}

#[test]
fn test_builder_defaults_respect_environment() {
    support::with_scoped_env(
        &[
            ("PORTFOLIO_BACKEND", None),
            ("SUPABASE_URL", None),
            ("SUPABASE_ANON_KEY", None),
            ("SUPABASE_DIRECT", None),
        ],
        || {
            let gateway = GatewayBuilder::new().build().unwrap();
            assert_eq!(gateway.backend_name(), "rest");
        },
    );
}

#[test]
fn test_builder_explicit_backend_and_credentials() {
    let gateway = GatewayBuilder::with_config(GatewayConfig::default())
        .backend(BackendKind::Supabase)
        .supabase_credentials("https://x.supabase.co", "anon")
        .build()
        .unwrap();
    assert_eq!(gateway.backend_name(), "supabase");
}

#[test]
fn test_builder_lowercases_admin_emails() {
    let builder = GatewayBuilder::with_config(GatewayConfig::default())
        .admin_emails(vec!["Admin@Example.COM".to_string()]);
    assert_eq!(builder.config().admin_emails, vec!["admin@example.com"]);
}
