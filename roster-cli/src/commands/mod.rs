//! Subcommand implementations.

pub mod event;
pub mod sync;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use roster_chat::{ChatClient, SlackApiClient};
use roster_core::AppConfig;
use roster_engine::Engine;
use roster_github::{GithubRestClient, TeamClient};
use roster_sheets::{GoogleSheetsValues, SheetValues};

/// Load configuration and wire up the live clients.
///
/// The GitHub client exists only when credentials are configured; the
/// spreadsheet transport only when a token and at least one sheet mapping
/// are present.
pub fn build_engine(config_path: &Path) -> Result<Engine> {
    let config = AppConfig::load_at(config_path)
        .with_context(|| format!("could not load '{}'", config_path.display()))?;

    let chat: Arc<dyn ChatClient> = Arc::new(SlackApiClient::new(config.chat.bot_token.clone()));
    let github: Option<Arc<dyn TeamClient>> = config
        .github
        .as_ref()
        .map(|g| Arc::new(GithubRestClient::new(g.token.clone())) as Arc<dyn TeamClient>);
    let sheets: Option<Arc<dyn SheetValues>> = config
        .sheets_token
        .as_ref()
        .filter(|_| !config.sheets.is_empty())
        .map(|token| Arc::new(GoogleSheetsValues::new(token.clone())) as Arc<dyn SheetValues>);

    Ok(Engine::new(config, chat, github, sheets))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
