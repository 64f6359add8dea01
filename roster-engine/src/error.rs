//! Error types for roster-engine.

use thiserror::Error;

use roster_chat::ChatError;
use roster_github::GithubError;
use roster_sheets::SheetError;

use crate::failure::FailureCause;
use crate::reconcile::MappingOutcome;

/// Errors from the batch reconciliation pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reconciliation needs a team client; events can run without one, the
    /// batch pass cannot.
    #[error("GitHub integration is not configured")]
    GithubNotConfigured,

    /// Organization/team/channel listing failed for the pass.
    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),

    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("ledger error: {0}")]
    Sheet(#[from] SheetError),

    /// A mapping accumulated per-user failures. Processing of subsequent
    /// mappings stops here (sequencing contract); outcomes for mappings
    /// that completed beforehand, and for the failed mapping's completed
    /// sub-actions, are still carried.
    #[error("sync stopped: mapping for channel {} finished with {} failure(s)",
        .failed.channel, .failed.failures.len())]
    MappingFailed {
        completed: Vec<MappingOutcome>,
        failed: MappingOutcome,
    },
}

/// One event's aggregated per-user failures.
#[derive(Debug, Error)]
#[error("failed handling {kind} event: {} failure(s)", .causes.len())]
pub struct EventError {
    pub kind: &'static str,
    pub causes: Vec<FailureCause>,
}

impl EventError {
    /// Whether the aggregate contains the (expected, recoverable)
    /// missing-profile condition.
    pub fn missing_profile(&self) -> bool {
        self.causes.iter().any(FailureCause::is_missing_profile)
    }

    /// Newline-joined `"<kind>(<detail>)"` rendering for the log boundary.
    pub fn render_causes(&self) -> String {
        self.causes
            .iter()
            .map(FailureCause::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
