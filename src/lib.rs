//! Idempotent demo-data seeder for InvenTree inventory instances.
//!
//! Populates part categories, a warehouse location tree, example parts and
//! tenant groups/locations through the REST API. Every call is
//! create-if-missing, so runs can be repeated safely.

pub mod api;
pub mod config;
pub mod outcome;
pub mod seed;

/// Version injected at compile time via INVSEED_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("INVSEED_VERSION") {
    Some(v) => v,
    None => "dev",
};
