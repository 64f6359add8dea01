//! The [`Engine`]: configuration plus the three remote clients.
//!
//! Constructed once at startup and shared by the batch reconciler and the
//! event handlers. The GitHub client and the spreadsheet transport are both
//! optional: without GitHub credentials team mutations are skipped (events
//! still maintain the ledger), and a mapping without a sheet mapping skips
//! ledger operations entirely.

use std::sync::Arc;

use roster_chat::ChatClient;
use roster_core::types::ChannelId;
use roster_core::AppConfig;
use roster_github::TeamClient;
use roster_sheets::{LedgerStore, SheetValues};

pub struct Engine {
    pub(crate) config: AppConfig,
    pub(crate) chat: Arc<dyn ChatClient>,
    pub(crate) github: Option<Arc<dyn TeamClient>>,
    pub(crate) sheets: Option<Arc<dyn SheetValues>>,
}

impl Engine {
    pub fn new(
        config: AppConfig,
        chat: Arc<dyn ChatClient>,
        github: Option<Arc<dyn TeamClient>>,
        sheets: Option<Arc<dyn SheetValues>>,
    ) -> Self {
        Self {
            config,
            chat,
            github,
            sheets,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Ledger store for a channel, when both a transport and a sheet
    /// mapping exist for it.
    pub(crate) fn ledger_store(&self, channel: &ChannelId) -> Option<LedgerStore> {
        let transport = self.sheets.clone()?;
        let mapping = self.config.sheet_for_channel(channel)?.clone();
        Some(LedgerStore::new(transport, mapping))
    }
}
