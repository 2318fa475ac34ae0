//! mythapi CLI - serve and inspect the mythology API
//!
//! - `serve`: run the HTTP API on the configured store
//! - `seed`: create the schema and load the reference pantheons
//! - `gods`: print gods straight from the store

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "mythapi",
    author,
    version,
    about = "CRUD HTTP API for mythological gods, their aliases and mythologies"
)]
struct Cli {
    /// Debug logging (when RUST_LOG is unset)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the schema and insert the reference mythologies
    Seed(commands::seed::SeedArgs),
    /// Print gods from the store
    Gods(commands::gods::GodsArgs),
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Seed(args) => commands::run_seed(args).await,
        Commands::Gods(args) => commands::run_gods(args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("failed to initialize tracing: {:#}", e);
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
