//! CLI harness for the key set details controller
//!
//! Loads a JSON fixture into in-memory collaborators and runs the listing,
//! export, removal and backup flows.

use clap::{Parser, Subcommand};
use keyset_cli::SessionOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keyset-cli")]
#[command(about = "Key set details controller harness", long_about = None)]
struct Cli {
    /// Fixture file (key sets, networks, connectivity)
    #[arg(short, long, global = true, default_value = "fixture.json")]
    fixture: PathBuf,

    /// Key set name
    #[arg(short, long, global = true, default_value = "Main")]
    key_set: String,

    /// Controller config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only show keys on these networks (repeatable)
    #[arg(short, long = "network", global = true)]
    networks: Vec<String>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived key listing
    Show {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the export payload
    Export {
        /// Derivation paths to export (repeatable)
        #[arg(short, long = "path")]
        paths: Vec<String>,

        /// Export every listed key
        #[arg(long)]
        all: bool,
    },

    /// Remove the key set
    Remove,

    /// Request a seed backup
    Backup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = SessionOptions {
        fixture: cli.fixture,
        key_set: cli.key_set,
        config: cli.config,
        networks: cli.networks,
    };

    let output = match cli.command {
        Commands::Show { json } => keyset_cli::show(&options, json).await?,
        Commands::Export { paths, all } => keyset_cli::export(&options, &paths, all).await?,
        Commands::Remove => keyset_cli::remove(&options).await?,
        Commands::Backup => keyset_cli::backup(&options).await?,
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    tracing::debug!("Done");
    Ok(())
}
