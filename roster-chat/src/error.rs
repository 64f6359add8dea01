//! Error types for roster-chat.

use thiserror::Error;

/// All errors that can arise from chat-platform calls.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The API answered but flagged the call as failed (`ok: false`).
    #[error("chat API call {method} failed: {code}")]
    Api { method: &'static str, code: String },

    /// Non-success HTTP response.
    #[error("chat API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure reaching the API.
    #[error("chat transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
