//! HTTP server command
//!
//! Opens the configured store, seeds it when empty and serves the API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use mythapi_server::{run_server, SeedOutcome, ServerConfig, Store};

use crate::config::StorageArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Address to bind to
    #[arg(long, short = 'b', env = "MYTHAPI_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Drop and recreate all tables before starting
    #[arg(long)]
    pub reset: bool,

    /// Do not insert the reference mythologies into an empty store
    #[arg(long)]
    pub no_seed: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let backend = args.storage.backend()?;
    tracing::info!(backend = %backend, "Starting mythapi server on {}", args.bind);

    let store = Store::open(backend)
        .await
        .context("Failed to open store")?;

    if args.reset {
        store.reset().await.context("Failed to reset store")?;
    }

    if !args.no_seed {
        match store.seed().await.context("Failed to seed store")? {
            SeedOutcome::Seeded { gods, .. } => tracing::info!(gods, "Store seeded"),
            SeedOutcome::AlreadyPresent => tracing::info!("Store already holds data, not seeding"),
        }
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
