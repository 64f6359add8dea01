//! The batch reconciliation pass.
//!
//! Mappings are processed strictly one at a time, in configuration order;
//! a systemic failure in one mapping is contained to it and ledger writes
//! never interleave across spreadsheets. Within a mapping the per-user work
//! fans out concurrently and is always joined in full — one user's failure
//! never cancels a sibling's in-flight operation.

use std::collections::HashSet;

use futures_util::future::join_all;
use tracing::{debug, info};

use roster_core::profile::{resolve_username, UserProfile};
use roster_core::types::{ChannelId, ChannelTeamMapping, TeamSlug, UserId, Username};
use roster_github::TeamClient;
use roster_sheets::LedgerStore;

use crate::engine::Engine;
use crate::error::SyncError;
use crate::failure::{FailureCause, UserFailure};
use crate::members;

/// Per-mapping result of one reconciliation pass.
#[derive(Debug)]
pub struct MappingOutcome {
    pub channel: ChannelId,
    pub team: TeamSlug,
    /// Users successfully added to the team.
    pub added: Vec<Username>,
    /// Users successfully removed from the team.
    pub removed: Vec<Username>,
    /// Per-user failures from either sub-action; sibling operations for
    /// other users completed regardless.
    pub failures: Vec<UserFailure>,
}

impl MappingOutcome {
    fn new(mapping: &ChannelTeamMapping) -> Self {
        Self {
            channel: mapping.channel.clone(),
            team: mapping.team.clone(),
            added: Vec::new(),
            removed: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// A channel member resolved to an eligible organization member.
struct ResolvedMember {
    profile: UserProfile,
    username: Username,
}

impl Engine {
    /// Run one full reconciliation pass over all configured mappings.
    ///
    /// Organization members are fetched once and shared read-only across
    /// mappings. A mapping that accumulates per-user failures stops the
    /// pass; the error carries the outcomes gathered so far.
    pub async fn reconcile(&self) -> Result<Vec<MappingOutcome>, SyncError> {
        let github = self.github.as_deref().ok_or(SyncError::GithubNotConfigured)?;
        let org = &self.config.organization;

        let org_members: HashSet<Username> =
            github.list_org_members(org).await?.into_iter().collect();
        info!(org = %org, members = org_members.len(), "fetched organization members");

        let mut completed = Vec::new();
        for mapping in &self.config.mappings {
            let outcome = self.reconcile_mapping(github, mapping, &org_members).await?;
            info!(
                channel = %outcome.channel,
                team = %outcome.team,
                added = outcome.added.len(),
                removed = outcome.removed.len(),
                failures = outcome.failures.len(),
                "mapping reconciled",
            );
            if outcome.failures.is_empty() {
                completed.push(outcome);
            } else {
                return Err(SyncError::MappingFailed {
                    completed,
                    failed: outcome,
                });
            }
        }
        Ok(completed)
    }

    async fn reconcile_mapping(
        &self,
        github: &dyn TeamClient,
        mapping: &ChannelTeamMapping,
        org_members: &HashSet<Username>,
    ) -> Result<MappingOutcome, SyncError> {
        let store = self.ledger_store(&mapping.channel);
        let org = &self.config.organization;

        let (channel_members, team_members) = tokio::join!(
            self.chat.channel_members(&mapping.channel),
            github.list_team_members(org, &mapping.team),
        );
        let channel_members = channel_members?;
        let team_members = team_members?;

        // Resolution phase: profile fetches fan out concurrently.
        let resolutions = join_all(
            channel_members
                .iter()
                .map(|user| self.resolve_member(user, org_members)),
        )
        .await;

        let mut outcome = MappingOutcome::new(mapping);
        // Working copy of the team; confirmed-present members are removed
        // from it, whatever remains afterwards has left the channel.
        let mut remaining: HashSet<Username> = team_members.into_iter().collect();
        let mut joiners = Vec::new();
        for resolution in resolutions {
            match resolution {
                Ok(Some(member)) => {
                    if !remaining.remove(&member.username) {
                        joiners.push(member);
                    }
                }
                Ok(None) => {}
                Err(failure) => outcome.failures.push(failure),
            }
        }

        // Mutation phase: adds first, then removals, each fanned out and
        // joined in full.
        let add_results = join_all(
            joiners
                .into_iter()
                .map(|member| self.apply_join(github, mapping, store.as_ref(), member)),
        )
        .await;
        for (added, mut failures) in add_results {
            outcome.failures.append(&mut failures);
            if let Some(username) = added {
                outcome.added.push(username);
            }
        }

        let remove_results = join_all(
            remaining
                .iter()
                .map(|username| self.apply_leave(github, mapping, store.as_ref(), username)),
        )
        .await;
        for (removed, mut failures) in remove_results {
            outcome.failures.append(&mut failures);
            if let Some(username) = removed {
                outcome.removed.push(username);
            }
        }

        Ok(outcome)
    }

    /// Resolve one channel member to an eligible org member.
    ///
    /// Apps, users without a GitHub profile URL, and users outside the
    /// organization are skipped silently — the batch pass is not the place
    /// to nag; the join event handler covers the reminder flow.
    async fn resolve_member(
        &self,
        user: &UserId,
        org_members: &HashSet<Username>,
    ) -> Result<Option<ResolvedMember>, UserFailure> {
        let profile = self
            .chat
            .user_profile(user)
            .await
            .map_err(|err| UserFailure {
                user: user.to_string(),
                cause: FailureCause::Chat(err),
            })?;
        if profile.is_app() {
            return Ok(None);
        }
        let Some(username) = resolve_username(&profile, &self.config.chat.github_url_field)
        else {
            debug!(user = %user, "no GitHub profile URL set, skipping");
            return Ok(None);
        };
        if !org_members.contains(&username) {
            debug!(user = %user, github = %username, "not an organization member, skipping");
            return Ok(None);
        }
        Ok(Some(ResolvedMember { profile, username }))
    }

    /// Add one user to the team and append their ledger join row,
    /// concurrently; either sub-action's failure is collected without
    /// suppressing the other's attempt.
    async fn apply_join(
        &self,
        github: &dyn TeamClient,
        mapping: &ChannelTeamMapping,
        store: Option<&LedgerStore>,
        member: ResolvedMember,
    ) -> (Option<Username>, Vec<UserFailure>) {
        info!(github = %member.username, channel = %mapping.channel, "new user found");
        let org = &self.config.organization;

        let ledger = async {
            match store {
                Some(store) => members::record_join(store, &member.profile, &member.username)
                    .await
                    .map(|_| ()),
                None => Ok(()),
            }
        };
        let (add_result, ledger_result) = tokio::join!(
            github.add_to_team(org, &mapping.team, &member.username),
            ledger,
        );

        let mut failures = Vec::new();
        let added = match add_result {
            Ok(()) => {
                info!(github = %member.username, team = %mapping.team, org = %org, "user added to team");
                Some(member.username.clone())
            }
            Err(err) => {
                failures.push(UserFailure {
                    user: member.username.to_string(),
                    cause: FailureCause::Github(err),
                });
                None
            }
        };
        if let Err(err) = ledger_result {
            failures.push(UserFailure {
                user: member.username.to_string(),
                cause: FailureCause::Sheet(err),
            });
        }
        (added, failures)
    }

    /// Remove one departed user from the team and close out their ledger
    /// row, concurrently; same failure-aggregation rule as joins.
    async fn apply_leave(
        &self,
        github: &dyn TeamClient,
        mapping: &ChannelTeamMapping,
        store: Option<&LedgerStore>,
        username: &Username,
    ) -> (Option<Username>, Vec<UserFailure>) {
        let org = &self.config.organization;

        let ledger = async {
            match store {
                Some(store) => members::record_leave(store, username).await,
                None => Ok(()),
            }
        };
        let (remove_result, ledger_result) = tokio::join!(
            github.remove_from_team(org, &mapping.team, username),
            ledger,
        );

        let mut failures = Vec::new();
        let removed = match remove_result {
            Ok(()) => {
                info!(github = %username, team = %mapping.team, org = %org, "user removed from team");
                Some(username.clone())
            }
            Err(err) => {
                failures.push(UserFailure {
                    user: username.to_string(),
                    cause: FailureCause::Github(err),
                });
                None
            }
        };
        if let Err(err) = ledger_result {
            failures.push(UserFailure {
                user: username.to_string(),
                cause: FailureCause::Sheet(err),
            });
        }
        (removed, failures)
    }
}
