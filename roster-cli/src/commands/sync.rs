//! `roster sync` — one batch reconciliation pass.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::error;

use roster_engine::{failure::render_failures, MappingOutcome, SyncError};

/// Arguments for `roster sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = "roster.yaml")]
    pub config: PathBuf,
}

impl SyncArgs {
    pub async fn run(self) -> Result<()> {
        let engine = super::build_engine(&self.config)?;

        match engine.reconcile().await {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    print_outcome(outcome);
                }
                Ok(())
            }
            Err(SyncError::MappingFailed { completed, failed }) => {
                for outcome in &completed {
                    print_outcome(outcome);
                }
                print_outcome(&failed);
                error!(
                    channel = %failed.channel,
                    "sync stopped:\n{}",
                    render_failures(&failed.failures)
                );
                bail!(
                    "mapping for channel {} finished with {} failure(s)",
                    failed.channel,
                    failed.failures.len()
                );
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn print_outcome(outcome: &MappingOutcome) {
    println!(
        "✓ {} → {} ({} added, {} removed, {} failed)",
        outcome.channel,
        outcome.team,
        outcome.added.len(),
        outcome.removed.len(),
        outcome.failures.len()
    );
    for user in &outcome.added {
        println!("  +  {user}");
    }
    for user in &outcome.removed {
        println!("  -  {user}");
    }
    for failure in &outcome.failures {
        println!("  !  {failure}");
    }
}
