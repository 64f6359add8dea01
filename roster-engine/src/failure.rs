//! Structured per-user failure records.
//!
//! One user's failure must never invalidate the action taken for every
//! other user, so failures are collected as typed records and folded into
//! an aggregate per mapping or per event. They render as
//! `"<kind>(<detail>)"` strings only at the boundary that logs them.

use std::fmt;

use roster_chat::ChatError;
use roster_core::types::{ChannelId, OrgSlug};
use roster_github::GithubError;
use roster_sheets::SheetError;

/// Why one per-user operation failed.
#[derive(Debug)]
pub enum FailureCause {
    /// The user has no GitHub profile URL set. Expected and recoverable:
    /// drives the anonymous-ledger-row and reminder-message flows.
    MissingGithubProfile,

    /// The resolved username is not an organization member.
    NotOrgMember { org: OrgSlug },

    /// The event's channel has no configured channel→team mapping.
    TeamReferenceMissing { channel: ChannelId },

    /// A team-membership remote call failed.
    Github(GithubError),

    /// A ledger remote call or ledger domain rule failed.
    Sheet(SheetError),

    /// A chat-platform remote call failed.
    Chat(ChatError),
}

impl FailureCause {
    pub fn is_missing_profile(&self) -> bool {
        matches!(self, FailureCause::MissingGithubProfile)
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::MissingGithubProfile => {
                write!(f, "MissingGithubProfile(no GitHub profile URL set)")
            }
            FailureCause::NotOrgMember { org } => {
                write!(f, "NotOrgMember(user is not part of the {org} organization)")
            }
            FailureCause::TeamReferenceMissing { channel } => {
                write!(f, "TeamReferenceMissing(no team configured for channel {channel})")
            }
            FailureCause::Github(GithubError::Http { status, message }) => {
                write_http(f, *status, message)
            }
            FailureCause::Sheet(SheetError::Http { status, message }) => {
                write_http(f, *status, message)
            }
            FailureCause::Chat(ChatError::Http { status, message }) => {
                write_http(f, *status, message)
            }
            FailureCause::Github(err) => write!(f, "GithubError({err})"),
            FailureCause::Sheet(err) => write!(f, "SheetError({err})"),
            FailureCause::Chat(err) => write!(f, "ChatError({err})"),
        }
    }
}

fn write_http(f: &mut fmt::Formatter<'_>, status: u16, message: &str) -> fmt::Result {
    if message.is_empty() {
        write!(f, "HttpError(status: {status})")
    } else {
        write!(f, "HttpError(status: {status}, data: {message})")
    }
}

/// One failed per-user operation, tagged with the user it concerned.
#[derive(Debug)]
pub struct UserFailure {
    /// Chat user id or canonical username, whichever identified the user at
    /// the point of failure.
    pub user: String,
    pub cause: FailureCause,
}

impl fmt::Display for UserFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.user, self.cause)
    }
}

/// Newline-joined rendering of an aggregate, for the log boundary.
pub fn render_failures(failures: &[UserFailure]) -> String {
    failures
        .iter()
        .map(UserFailure::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
