//! How a run ended, and the process exit code for it.

use crate::api::AuthMode;
use crate::seed::SeedReport;

/// Every resource was created or already present
pub const EXIT_OK: u8 = 0;
/// Nothing was seeded: API unreachable, credentials refused or bad config
pub const EXIT_FATAL: u8 = 1;
/// Seeding ran but some resources failed or were skipped
pub const EXIT_INCOMPLETE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome<'a> {
    NotReady,
    AuthRejected,
    Seeded(&'a SeedReport),
}

impl RunOutcome<'_> {
    /// Outcome that stops the run once authentication settled on `mode`,
    /// or `None` when seeding may go ahead.
    pub fn after_auth(mode: AuthMode, allow_guest: bool) -> Option<RunOutcome<'static>> {
        if mode.is_degraded() && !allow_guest {
            Some(RunOutcome::AuthRejected)
        } else {
            None
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::NotReady | RunOutcome::AuthRejected => EXIT_FATAL,
            RunOutcome::Seeded(report) if report.is_clean() => EXIT_OK,
            RunOutcome::Seeded(_) => EXIT_INCOMPLETE,
        }
    }
}
