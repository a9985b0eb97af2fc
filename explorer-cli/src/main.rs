//! Datasource explorer driver
//!
//! Renders the "Datasources" tree node from a JSON snapshot and persists
//! its expansion state, the way an editor host would.
//!
//! Usage:
//!   explorer-cli --store state.db view --snapshot snapshot.json
//!   explorer-cli --store state.db toggle --container app-1 --open false
//!   explorer-cli activate --snapshot snapshot.json --affordance header-add

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use explorer_cli::{
    AffordanceChoice, LoggingNavigator, LoggingWalkthrough, Snapshot, activate, open_backend,
    render_json,
};
use explorer_types::ContainerId;
use explorer_view::{DatasourceExplorer, ExplorerConfig, TracingTelemetry, dispatch};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "explorer-cli")]
#[command(about = "Datasource explorer projection driver")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite file for expansion state (overrides the config)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the view model for a snapshot as JSON
    View {
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Record the node as opened or closed
    Toggle {
        #[arg(long)]
        container: String,

        #[arg(long, action = clap::ArgAction::Set)]
        open: bool,
    },
    /// Forget the recorded expansion state of a container
    Reset {
        #[arg(long)]
        container: String,
    },
    /// Run the commands behind one of the node's affordances
    Activate {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long, value_enum)]
        affordance: AffordanceChoice,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => ExplorerConfig::load_from(path),
        None => ExplorerConfig::default(),
    };
    let store_path = args.store.clone().or_else(|| config.storage.resolved_path());
    debug!(?store_path, "Resolved explorer state store");

    let backend = open_backend(store_path.as_deref())?;
    let explorer = DatasourceExplorer::from_config(&config, &*backend);

    match args.command {
        Cmd::View { snapshot } => {
            let snapshot = Snapshot::load(&snapshot)?;
            println!("{}", render_json(&explorer, &snapshot)?);
        }
        Cmd::Toggle { container, open } => {
            let container = ContainerId::parse(&container)
                .with_context(|| format!("invalid container id {container:?}"))?;
            let is_open = explorer.on_toggle(&container, open);
            println!("{is_open}");
        }
        Cmd::Reset { container } => {
            let container = ContainerId::parse(&container)
                .with_context(|| format!("invalid container id {container:?}"))?;
            explorer.store().clear(&container);
            info!("Cleared explorer state for {}", container);
        }
        Cmd::Activate {
            snapshot,
            affordance,
        } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let commands = activate(&explorer, &snapshot, affordance)?;
            info!("Running {} command(s) for {:?}", commands.len(), affordance);
            dispatch(
                &commands,
                &LoggingNavigator,
                &TracingTelemetry,
                &LoggingWalkthrough,
            );
            println!("{}", serde_json::to_string_pretty(&commands)?);
        }
    }

    Ok(())
}
