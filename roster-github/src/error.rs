//! Error types for roster-github.

use thiserror::Error;

/// All errors that can arise from team membership calls.
///
/// Each remote call fails independently; failures carry the HTTP status and
/// any response body so the engine can fold them into a per-user aggregate.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Non-success response from the API.
    #[error("GitHub API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure reaching the API.
    #[error("GitHub transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
