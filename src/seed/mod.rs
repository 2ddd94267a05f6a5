//! Idempotent hierarchical seeding
//!
//! Every seeder builds a [`SeedPlan`] (an ordered tree of
//! [`ResourceSpec`]s) and hands it to [`execute_plan`], which upserts each
//! node and threads parent ids down the tree.
//!
//! # Architecture
//!
//! - [`plan`] - declarative resource trees
//! - [`layout`] - warehouse zones/columns/shelves/bins and their naming
//! - [`catalog`] - compiled-in categories, parts and tenants
//! - [`upsert`] - create-or-find, lookup by name, cache priming
//! - [`classify`] - tells duplicate rejections from real errors
//! - [`builder`] - plan execution with subtree skipping
//! - [`seeders`] / [`tenants`] - one entry point per resource tree

pub mod builder;
pub mod catalog;
pub mod classify;
pub mod context;
mod error;
pub mod kind;
pub mod layout;
pub mod plan;
pub mod seeders;
pub mod tenants;
pub mod upsert;

#[cfg(test)]
pub(crate) mod fake;

pub use builder::{execute_plan, PlanRun};
pub use context::{NameCache, SeedContext, SeedReport};
pub use error::SeedError;
pub use kind::ResourceKind;
pub use layout::WarehouseLayout;
pub use plan::{ResourceSpec, SeedPlan};
pub use seeders::{seed_categories, seed_locations, seed_parts};
pub use tenants::seed_tenants;
pub use upsert::{find_by_name, prime_cache, upsert, Upserted};
