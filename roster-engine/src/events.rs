//! Incremental, single-event counterparts to the batch reconciler.
//!
//! Each handler reuses the same business rules: team mutation and ledger
//! mutation run concurrently, failures are aggregated per event, and the
//! missing-profile condition triggers the reminder side channel on joins.

use futures_util::future::join_all;
use tracing::{info, warn};

use roster_core::profile::{resolve_username, UserProfile};
use roster_core::types::{ChannelId, ChannelTeamMapping, UserId, Username};
use roster_core::ChatEvent;

use crate::engine::Engine;
use crate::error::EventError;
use crate::failure::FailureCause;
use crate::members::{self, BackfillRecord};

/// Reminder sent to a user who joined a channel without a GitHub URL in
/// their profile.
const PROFILE_REMINDER: &str = "Hi! Please, remember to set your Github url in your profile.";

impl Engine {
    /// Dispatch one normalized event.
    ///
    /// Errors carry the event's aggregated per-user failures; the caller
    /// logs them and does not retry.
    pub async fn handle_event(&self, event: &ChatEvent) -> Result<(), EventError> {
        info!(kind = event.kind(), "handling chat event");
        match event {
            ChatEvent::MemberJoined { channel, user, profile } => {
                self.handle_member_joined(channel, user, profile).await
            }
            ChatEvent::MemberLeft { channel, user, profile } => {
                self.handle_member_left(channel, user, profile).await
            }
            ChatEvent::ProfileChanged { user, profile } => {
                self.handle_profile_changed(user, profile).await
            }
        }
    }

    async fn handle_member_joined(
        &self,
        channel: &ChannelId,
        user: &UserId,
        profile: &UserProfile,
    ) -> Result<(), EventError> {
        let username = resolve_username(profile, &self.config.chat.github_url_field);

        let team_action = async {
            let Some(github) = self.github.as_deref() else {
                return Ok(());
            };
            let Some(team) = self.config.team_for_channel(channel) else {
                return Err(FailureCause::TeamReferenceMissing {
                    channel: channel.clone(),
                });
            };
            let Some(username) = username.clone() else {
                return Err(FailureCause::MissingGithubProfile);
            };
            let org = &self.config.organization;
            match github.is_org_member(org, &username).await {
                Ok(true) => {}
                Ok(false) => return Err(FailureCause::NotOrgMember { org: org.clone() }),
                Err(err) => return Err(FailureCause::Github(err)),
            }
            github
                .add_to_team(org, team, &username)
                .await
                .map_err(FailureCause::Github)?;
            info!(github = %username, team = %team, "user added to team");
            Ok(())
        };

        let ledger_action = async {
            let Some(store) = self.ledger_store(channel) else {
                warn!(channel = %channel, "no sheet configured, skipping ledger entry");
                return Ok(());
            };
            match &username {
                Some(username) => members::record_join(&store, profile, username)
                    .await
                    .map(|_| ())
                    .map_err(FailureCause::Sheet),
                None => {
                    // Anonymous row now, backfilled once the profile is
                    // set; the missing-profile condition still surfaces.
                    members::record_anonymous_join(&store, profile)
                        .await
                        .map_err(FailureCause::Sheet)?;
                    Err(FailureCause::MissingGithubProfile)
                }
            }
        };

        let (team_result, ledger_result) = tokio::join!(team_action, ledger_action);
        let causes: Vec<FailureCause> = [team_result.err(), ledger_result.err()]
            .into_iter()
            .flatten()
            .collect();
        if causes.is_empty() {
            return Ok(());
        }

        let error = EventError {
            kind: "member_joined",
            causes,
        };
        if error.missing_profile() {
            if let Err(err) = self.chat.send_direct_message(user, PROFILE_REMINDER).await {
                warn!(user = %user, error = %err, "failed to send profile reminder");
            }
        }
        Err(error)
    }

    async fn handle_member_left(
        &self,
        channel: &ChannelId,
        _user: &UserId,
        profile: &UserProfile,
    ) -> Result<(), EventError> {
        let username = resolve_username(profile, &self.config.chat.github_url_field);

        let team_action = async {
            let Some(github) = self.github.as_deref() else {
                return Ok(());
            };
            let Some(team) = self.config.team_for_channel(channel) else {
                return Err(FailureCause::TeamReferenceMissing {
                    channel: channel.clone(),
                });
            };
            let Some(username) = username.clone() else {
                return Err(FailureCause::MissingGithubProfile);
            };
            github
                .remove_from_team(&self.config.organization, team, &username)
                .await
                .map_err(FailureCause::Github)?;
            info!(github = %username, team = %team, "user removed from team");
            Ok(())
        };

        let ledger_action = async {
            let Some(store) = self.ledger_store(channel) else {
                return Ok(());
            };
            let Some(username) = username.clone() else {
                return Err(FailureCause::MissingGithubProfile);
            };
            members::record_leave(&store, &username)
                .await
                .map_err(FailureCause::Sheet)
        };

        let (team_result, ledger_result) = tokio::join!(team_action, ledger_action);
        let causes: Vec<FailureCause> = [team_result.err(), ledger_result.err()]
            .into_iter()
            .flatten()
            .collect();
        if causes.is_empty() {
            Ok(())
        } else {
            Err(EventError {
                kind: "member_left",
                causes,
            })
        }
    }

    /// (i) Re-add the user to the team of every configured channel they are
    /// currently in — self-heals a previously failed or missed add.
    /// (ii) Independently, backfill their last ledger row with the now-known
    /// username when it lacks one.
    async fn handle_profile_changed(
        &self,
        user: &UserId,
        profile: &UserProfile,
    ) -> Result<(), EventError> {
        let Some(username) = resolve_username(profile, &self.config.chat.github_url_field)
        else {
            info!(user = %user, "profile changed but no GitHub URL set");
            return Err(EventError {
                kind: "profile_changed",
                causes: vec![FailureCause::MissingGithubProfile],
            });
        };

        let results = join_all(
            self.config
                .mappings
                .iter()
                .map(|mapping| self.heal_mapping(mapping, user, profile, &username)),
        )
        .await;
        let causes: Vec<FailureCause> = results.into_iter().flatten().collect();
        if causes.is_empty() {
            Ok(())
        } else {
            Err(EventError {
                kind: "profile_changed",
                causes,
            })
        }
    }

    async fn heal_mapping(
        &self,
        mapping: &ChannelTeamMapping,
        user: &UserId,
        profile: &UserProfile,
        username: &Username,
    ) -> Vec<FailureCause> {
        let members_in_channel = match self.chat.channel_members(&mapping.channel).await {
            Ok(members) => members,
            Err(err) => return vec![FailureCause::Chat(err)],
        };
        if !members_in_channel.contains(user) {
            return Vec::new();
        }

        let re_add = async {
            let Some(github) = self.github.as_deref() else {
                return Ok(());
            };
            github
                .add_to_team(&self.config.organization, &mapping.team, username)
                .await
                .map_err(FailureCause::Github)?;
            info!(github = %username, team = %mapping.team, "user (re)added to team");
            Ok(())
        };

        let backfill = async {
            let Some(store) = self.ledger_store(&mapping.channel) else {
                return Ok(());
            };
            match members::backfill_username(&store, profile.display_name(), username).await {
                Ok(BackfillRecord::Updated) => Ok(()),
                Ok(_) => {
                    info!(
                        channel = %mapping.channel,
                        "user not in sheet or username already set, nothing to change",
                    );
                    Ok(())
                }
                Err(err) => Err(FailureCause::Sheet(err)),
            }
        };

        let (re_add_result, backfill_result) = tokio::join!(re_add, backfill);
        [re_add_result.err(), backfill_result.err()]
            .into_iter()
            .flatten()
            .collect()
    }
}
