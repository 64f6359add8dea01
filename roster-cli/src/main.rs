//! Roster — membership reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! roster sync --config roster.yaml
//! roster event --config roster.yaml <event.json>
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{event::EventArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Keep GitHub teams and the membership ledger in sync with chat channels",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one full reconciliation pass over every configured mapping.
    Sync(SyncArgs),

    /// Handle a single chat event from a JSON file (`-` reads stdin).
    Event(EventArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run().await,
        Commands::Event(args) => args.run().await,
    }
}
