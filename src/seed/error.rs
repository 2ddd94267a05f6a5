use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the seeding layer
#[derive(Debug, Error)]
pub enum SeedError {
    /// Request never got an HTTP answer
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    /// Server refused the request for a reason other than a duplicate
    #[error("{kind} '{name}' rejected with {status}: {body}")]
    Rejected {
        kind: &'static str,
        name: String,
        status: u16,
        body: Value,
    },

    /// Server reported a duplicate but the lookup found nothing matching
    #[error("{kind} '{name}' reported as existing but lookup found no match")]
    ConflictUnresolved { kind: &'static str, name: String },

    /// Success status without a usable `pk`
    #[error("{kind} '{name}' response carried no primary key")]
    MalformedResponse { kind: &'static str, name: String },

    #[error("API not ready after {attempts} attempts")]
    NotReady { attempts: u32 },
}
