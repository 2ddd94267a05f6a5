//! Inventory API interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - token / basic / guest authentication
//! - [`client`] - authenticated session and the [`Transport`] seam
//! - [`http`] - HTTP utilities for REST API calls
//! - [`readiness`] - bounded readiness polling
//!
//! # Example
//!
//! ```ignore
//! use invseed::api::{ApiSession, Transport};
//!
//! async fn example(config: &invseed::config::ApiConfig) -> anyhow::Result<()> {
//!     let mut session = ApiSession::new(config)?;
//!     session.authenticate().await;
//!     let categories = session.get("part/category/", &[]).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod readiness;

pub use auth::AuthMode;
pub use client::{ApiSession, Transport};
pub use http::ApiResponse;
pub use readiness::{wait_until_ready, ReadinessPolicy};
