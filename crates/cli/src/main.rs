//! Nexus CLI - database setup and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Create the database schema
//! nexus-cli init
//!
//! # Insert a demo merchant and a starter catalog
//! nexus-cli seed
//! ```
//!
//! # Commands
//!
//! - `init` - Create the `SQLite` schema (idempotent)
//! - `seed` - Insert demo data through the real services

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(author, version, about = "Nexus CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema (idempotent)
    Init,
    /// Insert a demo merchant and a starter catalog
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Init => commands::init::run().await?,
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
