//! The [`TeamClient`] trait.

use async_trait::async_trait;

use roster_core::types::{OrgSlug, TeamSlug, Username};

use crate::error::GithubError;

/// Team membership operations against the code-hosting platform.
///
/// Listing operations paginate fully and return the complete membership.
/// All returned usernames are canonical ([`Username`] lower-cases on
/// construction), so callers can compare them directly.
#[async_trait]
pub trait TeamClient: Send + Sync {
    /// Every member of the organization.
    async fn list_org_members(&self, org: &OrgSlug) -> Result<Vec<Username>, GithubError>;

    /// Every member of one team in the organization.
    async fn list_team_members(
        &self,
        org: &OrgSlug,
        team: &TeamSlug,
    ) -> Result<Vec<Username>, GithubError>;

    /// Whether `username` is an organization member.
    async fn is_org_member(&self, org: &OrgSlug, username: &Username)
        -> Result<bool, GithubError>;

    /// Add (or re-confirm) `username` on the team. For a user not yet in the
    /// organization this triggers the platform's invitation flow instead of
    /// immediate membership.
    async fn add_to_team(
        &self,
        org: &OrgSlug,
        team: &TeamSlug,
        username: &Username,
    ) -> Result<(), GithubError>;

    /// Remove `username` from the team.
    async fn remove_from_team(
        &self,
        org: &OrgSlug,
        team: &TeamSlug,
        username: &Username,
    ) -> Result<(), GithubError>;
}
