//! Application configuration: one YAML file, loaded once at startup.
//!
//! The resulting [`AppConfig`] is read-only for the lifetime of the run and
//! is passed by reference to every component that needs it — there is no
//! ambient global lookup.
//!
//! ```yaml
//! organization: acme
//! github:
//!   token: ghs_...
//! chat:
//!   bot_token: xoxb-...
//!   github_url_field: Xf017V75HGSQ
//! sheets_token: ya29....
//! mappings:
//!   - channel: C024BE91L
//!     team: platform
//! sheets:
//!   - channel: C024BE91L
//!     spreadsheet_id: 1BxiMVs0...
//!     data_range: Data!A2:F
//!     locale: en-US
//!     timezone: America/New_York
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{ChannelId, ChannelTeamMapping, OrgSlug, SheetMapping, TeamSlug};

/// GitHub credentials. Absence of this whole section disables team
/// mutations (events still maintain the ledger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    pub token: String,
}

/// Chat-platform credentials and the profile field holding the GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    pub bot_token: String,
    /// Id of the custom profile field expected to hold the user's GitHub
    /// profile URL.
    pub github_url_field: String,
}

/// Root configuration object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub organization: OrgSlug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubConfig>,
    pub chat: ChatConfig,
    /// Bearer token for the spreadsheet service; required only when
    /// `sheets` is non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets_token: Option<String>,
    #[serde(default)]
    pub mappings: Vec<ChannelTeamMapping>,
    #[serde(default)]
    pub sheets: Vec<SheetMapping>,
}

impl AppConfig {
    /// Load and validate configuration from a YAML file.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Every sheet mapping must belong to a configured channel→team mapping.
    fn validate(&self) -> Result<(), ConfigError> {
        for sheet in &self.sheets {
            if self.team_for_channel(&sheet.channel).is_none() {
                return Err(ConfigError::DanglingSheetMapping {
                    channel: sheet.channel.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The GitHub team mapped to `channel`, if any.
    pub fn team_for_channel(&self, channel: &ChannelId) -> Option<&TeamSlug> {
        self.mappings
            .iter()
            .find(|m| &m.channel == channel)
            .map(|m| &m.team)
    }

    /// The ledger sheet mapped to `channel`, if any.
    pub fn sheet_for_channel(&self, channel: &ChannelId) -> Option<&SheetMapping> {
        self.sheets.iter().find(|s| &s.channel == channel)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
