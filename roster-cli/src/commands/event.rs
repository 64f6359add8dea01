//! `roster event` — handle a single chat event from JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::error;

use roster_core::ChatEvent;

/// Arguments for `roster event`.
#[derive(Args, Debug)]
pub struct EventArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = "roster.yaml")]
    pub config: PathBuf,

    /// Path to the event JSON; `-` reads stdin.
    pub event: PathBuf,
}

impl EventArgs {
    pub async fn run(self) -> Result<()> {
        let raw = if self.event.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("could not read event from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.event)
                .with_context(|| format!("could not read '{}'", self.event.display()))?
        };
        let event: ChatEvent =
            serde_json::from_str(&raw).context("event JSON did not parse")?;

        let engine = super::build_engine(&self.config)?;
        if let Err(err) = engine.handle_event(&event).await {
            error!("{err}:\n{}", err.render_causes());
            bail!("{err}");
        }
        println!("✓ {} handled", event.kind());
        Ok(())
    }
}
