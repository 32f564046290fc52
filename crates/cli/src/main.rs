//! Mercado CLI - batch tools for the CDC demo.
//!
//! # Usage
//!
//! ```bash
//! # Create the source tables
//! mercado-cli migrate
//!
//! # Land one seed batch (inserts, updates, deletes)
//! mercado-cli seed --orders 5
//!
//! # Print current source-database statistics
//! mercado-cli stats
//!
//! # Run the whole batch pipeline: seed, connector sync, transform
//! mercado-cli pipeline run
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run source-database migrations
//! - `seed` - Seed the source database with one change batch
//! - `stats` - Report aggregate source-database statistics
//! - `pipeline run` - Seed, trigger the CDC connector sync, run transforms

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mercado-cli")]
#[command(author, version, about = "Mercado CDC demo CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run source-database migrations
    Migrate,
    /// Seed the source database with one change batch
    Seed {
        /// Random orders to insert
        #[arg(long, default_value_t = 5)]
        orders: u32,

        /// Random customer email updates
        #[arg(long, default_value_t = 2)]
        updates: u32,

        /// Guarded customer deletes
        #[arg(long, default_value_t = 1)]
        deletes: u32,
    },
    /// Report aggregate source-database statistics
    Stats,
    /// Orchestrate the batch pipeline
    Pipeline {
        #[command(subcommand)]
        action: PipelineAction,
    },
}

#[derive(Subcommand)]
enum PipelineAction {
    /// Seed the source database, trigger the connector sync, run transforms
    Run,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            orders,
            updates,
            deletes,
        } => {
            commands::seed::run(orders, updates, deletes).await?;
        }
        Commands::Stats => commands::stats::run().await?,
        Commands::Pipeline { action } => match action {
            PipelineAction::Run => commands::pipeline::run().await?,
        },
    }
    Ok(())
}
