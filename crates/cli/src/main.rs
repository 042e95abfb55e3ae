//! Tiffin CLI - Operator tools for the data directory.
//!
//! # Usage
//!
//! ```bash
//! # Create any missing collection files
//! tiffin init
//!
//! # Export orders as CSV to stdout, or to a file
//! tiffin export orders
//! tiffin export customers --output customers.csv
//!
//! # Replace the menu from a JSON array file
//! tiffin menu import menu.json
//!
//! # Print the current menu
//! tiffin menu show
//! ```
//!
//! Every command works on `--data-dir`, falling back to `TIFFIN_DATA_DIR`
//! and then `data`. The CLI writes files directly; run it while the server is
//! stopped, since the server's collection locks are per-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tiffin_core::Collection;
use tiffin_server::config::DEFAULT_DATA_DIR;
use tiffin_server::store::JsonStore;

mod commands;

#[derive(Parser)]
#[command(name = "tiffin")]
#[command(author, version, about = "Tiffin data directory tools")]
struct Cli {
    /// Directory holding the collection files
    #[arg(long, global = true, env = "TIFFIN_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing collection files as empty arrays
    Init,
    /// Export a collection as CSV
    Export {
        /// Collection to export (menu, orders, reservations, customers)
        collection: Collection,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage the menu
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
}

#[derive(Subcommand)]
enum MenuAction {
    /// Replace the menu with the JSON array in FILE
    Import {
        /// JSON file holding an array of menu items
        file: PathBuf,
    },
    /// Print the current menu as JSON
    Show,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing (stderr, so exported CSV on stdout stays clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiffin_cli=info,tiffin_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::new(cli.data_dir);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Init => commands::init::run(&store, &mut stdout).await?,
        Commands::Export { collection, output } => {
            commands::export::run(&store, collection, output.as_deref(), &mut stdout).await?;
        }
        Commands::Menu { action } => match action {
            MenuAction::Import { file } => commands::menu::import(&store, &file).await?,
            MenuAction::Show => commands::menu::show(&store, &mut stdout).await?,
        },
    }
    Ok(())
}
