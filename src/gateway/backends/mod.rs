//! Gateway implementations.
//!
//! Three backends share the contract in [`crate::gateway::contract`]:
//! - `rest`: the legacy server API (cookies, CSRF, `{data}` envelopes)
//! - `supabase`: direct table, auth and storage access
//! - `local`: in-memory, for tests and offline development

pub mod local;
pub mod rest;
pub mod supabase;

pub use local::LocalGateway;
pub use rest::RestGateway;
pub use supabase::SupabaseGateway;
