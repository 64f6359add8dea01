//! In-memory stand-ins for the three remote services.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use roster_chat::{ChatClient, ChatError};
use roster_core::config::{AppConfig, ChatConfig, GithubConfig};
use roster_core::profile::{ProfileField, UserProfile};
use roster_core::types::{
    ChannelId, ChannelTeamMapping, OrgSlug, SheetMapping, TeamSlug, UserId, Username,
};
use roster_engine::Engine;
use roster_github::{GithubError, TeamClient};
use roster_sheets::{SheetError, SheetValues};

pub const URL_FIELD: &str = "XfGithub";

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeChat {
    pub members: HashMap<ChannelId, Vec<UserId>>,
    pub profiles: HashMap<UserId, UserProfile>,
    pub sent: Mutex<Vec<(UserId, String)>>,
}

impl FakeChat {
    pub fn sent_messages(&self) -> Vec<(UserId, String)> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ChatClient for FakeChat {
    async fn channel_members(&self, channel: &ChannelId) -> Result<Vec<UserId>, ChatError> {
        Ok(self.members.get(channel).cloned().unwrap_or_default())
    }

    async fn user_profile(&self, user: &UserId) -> Result<UserProfile, ChatError> {
        self.profiles
            .get(user)
            .cloned()
            .ok_or(ChatError::Api {
                method: "users.profile.get",
                code: "user_not_found".to_string(),
            })
    }

    async fn send_direct_message(&self, user: &UserId, text: &str) -> Result<(), ChatError> {
        self.sent
            .lock()
            .expect("lock")
            .push((user.clone(), text.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeTeams {
    pub org: HashSet<Username>,
    pub teams: Mutex<HashMap<TeamSlug, HashSet<Username>>>,
    /// Usernames whose team-add calls fail with an HTTP 502.
    pub fail_add: HashSet<Username>,
}

impl FakeTeams {
    pub fn team(&self, team: &TeamSlug) -> HashSet<Username> {
        self.teams
            .lock()
            .expect("lock")
            .get(team)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TeamClient for FakeTeams {
    async fn list_org_members(&self, _org: &OrgSlug) -> Result<Vec<Username>, GithubError> {
        Ok(self.org.iter().cloned().collect())
    }

    async fn list_team_members(
        &self,
        _org: &OrgSlug,
        team: &TeamSlug,
    ) -> Result<Vec<Username>, GithubError> {
        Ok(self.team(team).into_iter().collect())
    }

    async fn is_org_member(
        &self,
        _org: &OrgSlug,
        username: &Username,
    ) -> Result<bool, GithubError> {
        Ok(self.org.contains(username))
    }

    async fn add_to_team(
        &self,
        _org: &OrgSlug,
        team: &TeamSlug,
        username: &Username,
    ) -> Result<(), GithubError> {
        if self.fail_add.contains(username) {
            return Err(GithubError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        self.teams
            .lock()
            .expect("lock")
            .entry(team.clone())
            .or_default()
            .insert(username.clone());
        Ok(())
    }

    async fn remove_from_team(
        &self,
        _org: &OrgSlug,
        team: &TeamSlug,
        username: &Username,
    ) -> Result<(), GithubError> {
        self.teams
            .lock()
            .expect("lock")
            .entry(team.clone())
            .or_default()
            .remove(username);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

/// In-memory sheet; updates address rows by the trailing row number of the
/// A1 address, relative to `first_row`.
pub struct FakeSheet {
    pub rows: Mutex<Vec<Vec<String>>>,
    pub first_row: usize,
}

impl FakeSheet {
    pub fn empty() -> Self {
        Self::with_rows(&[])
    }

    pub fn with_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: Mutex::new(
                rows.iter()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
            ),
            first_row: 2,
        }
    }

    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.lock().expect("lock").clone()
    }

    fn row_number(range: &str) -> usize {
        let digits: String = range
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits
            .chars()
            .rev()
            .collect::<String>()
            .parse()
            .expect("row number in address")
    }
}

#[async_trait]
impl SheetValues for FakeSheet {
    async fn get(&self, _id: &str, _range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        Ok(self.snapshot())
    }

    async fn append(&self, _id: &str, _range: &str, row: Vec<String>) -> Result<(), SheetError> {
        self.rows.lock().expect("lock").push(row);
        Ok(())
    }

    async fn update(&self, _id: &str, range: &str, row: Vec<String>) -> Result<(), SheetError> {
        let index = Self::row_number(range) - self.first_row;
        self.rows.lock().expect("lock")[index] = row;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn profile(name: &str, github_url: Option<&str>) -> UserProfile {
    let mut fields = HashMap::new();
    if let Some(url) = github_url {
        fields.insert(
            URL_FIELD.to_string(),
            ProfileField {
                value: url.to_string(),
            },
        );
    }
    UserProfile {
        real_name: name.to_string(),
        fields,
        ..UserProfile::default()
    }
}

pub fn app_profile(name: &str) -> UserProfile {
    UserProfile {
        real_name: name.to_string(),
        api_app_id: Some("A1".to_string()),
        ..UserProfile::default()
    }
}

/// One mapping per (channel, team) pair; a sheet mapping for every channel
/// named in `sheet_channels`.
pub fn config(mappings: &[(&str, &str)], sheet_channels: &[&str]) -> AppConfig {
    AppConfig {
        organization: OrgSlug::from("acme"),
        github: Some(GithubConfig {
            token: "ghs_test".to_string(),
        }),
        chat: ChatConfig {
            bot_token: "xoxb-test".to_string(),
            github_url_field: URL_FIELD.to_string(),
        },
        sheets_token: Some("token".to_string()),
        mappings: mappings
            .iter()
            .map(|(channel, team)| ChannelTeamMapping {
                channel: ChannelId::from(*channel),
                team: TeamSlug::from(*team),
            })
            .collect(),
        sheets: sheet_channels
            .iter()
            .map(|channel| SheetMapping {
                channel: ChannelId::from(*channel),
                spreadsheet_id: format!("sheet-{channel}"),
                data_range: "A2:F".to_string(),
                locale: "en-US".to_string(),
                timezone: "UTC".to_string(),
            })
            .collect(),
    }
}

pub fn engine(
    config: AppConfig,
    chat: &Arc<FakeChat>,
    teams: Option<&Arc<FakeTeams>>,
    sheet: Option<&Arc<FakeSheet>>,
) -> Engine {
    Engine::new(
        config,
        chat.clone(),
        teams.map(|t| t.clone() as Arc<dyn TeamClient>),
        sheet.map(|s| s.clone() as Arc<dyn SheetValues>),
    )
}

/// Today's ledger date in UTC, matching what the engine writes for the
/// mappings built by [`config`].
pub fn today() -> String {
    roster_sheets::ledger_date(chrono::Utc::now(), "UTC").expect("date")
}
