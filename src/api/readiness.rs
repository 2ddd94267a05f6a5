//! Readiness polling
//!
//! Bounded retry loop against the API root. A fixed delay separates
//! attempts; there is no backoff.

use super::client::Transport;
use crate::seed::SeedError;
use std::time::Duration;

/// Status codes that prove the API is up, even if it refuses us
pub const ACCEPTED_STATUSES: &[u16] = &[200, 401, 403];

/// Retry budget for [`wait_until_ready`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_retries: 30,
            delay: Duration::from_secs(5),
        }
    }
}

/// Probe the API root until it answers with an accepted status.
///
/// Returns the 1-based attempt that succeeded. Makes exactly
/// `max_retries` probes before giving up, and does not sleep after the
/// last one.
pub async fn wait_until_ready<T>(api: &T, policy: &ReadinessPolicy) -> Result<u32, SeedError>
where
    T: Transport + ?Sized,
{
    tracing::info!("Waiting for inventory API to be ready...");

    for attempt in 1..=policy.max_retries {
        match api.get("", &[]).await {
            Ok(response) if ACCEPTED_STATUSES.contains(&response.status) => {
                tracing::info!("API is ready (attempt {})", attempt);
                return Ok(attempt);
            }
            Ok(response) => {
                tracing::debug!("Readiness probe answered {}", response.status);
            }
            Err(e) => {
                tracing::debug!("Readiness probe failed: {:#}", e);
            }
        }

        if attempt < policy.max_retries {
            tracing::info!(
                "Attempt {}/{} - retrying in {}s...",
                attempt,
                policy.max_retries,
                policy.delay.as_secs_f32()
            );
            tokio::time::sleep(policy.delay).await;
        }
    }

    tracing::error!("API failed to respond after {} attempts", policy.max_retries);
    Err(SeedError::NotReady {
        attempts: policy.max_retries,
    })
}
