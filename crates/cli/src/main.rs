//! Zidar CLI - schema bootstrap and demo data tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply the shop database schema
//! zidar schema shop
//!
//! # Apply the events database schema
//! zidar schema events
//!
//! # Apply both schemas
//! zidar schema all
//!
//! # Load demo data into both databases
//! zidar seed
//! ```
//!
//! # Commands
//!
//! - `schema` - Apply the bundled DDL to the configured databases
//! - `seed` - Load demo categories, articles, accounts and events

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "zidar")]
#[command(author, version, about = "Zidar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database schemas
    Schema {
        #[command(subcommand)]
        target: SchemaTarget,
    },
    /// Load demo data into both databases
    Seed,
}

#[derive(Subcommand)]
enum SchemaTarget {
    /// Apply the shop database schema
    Shop,
    /// Apply the events database schema
    Events,
    /// Apply both schemas
    All,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Schema { target } => match target {
            SchemaTarget::Shop => commands::schema::shop().await?,
            SchemaTarget::Events => commands::schema::events().await?,
            SchemaTarget::All => {
                commands::schema::shop().await?;
                commands::schema::events().await?;
            }
        },
        Commands::Seed => commands::seed::demo().await?,
    }
    Ok(())
}
