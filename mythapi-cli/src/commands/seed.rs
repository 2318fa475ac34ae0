//! Seed command: migrate the store and load the reference pantheons

use anyhow::{Context, Result};
use clap::Parser;

use mythapi_server::{SeedOutcome, Store};

use crate::config::StorageArgs;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Drop and recreate all tables first
    #[arg(long)]
    pub reset: bool,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let backend = args.storage.backend()?;
    let store = Store::open(backend).await.context("Failed to open store")?;

    if args.reset {
        store.reset().await.context("Failed to reset store")?;
    }

    match store.seed().await.context("Failed to seed store")? {
        SeedOutcome::Seeded {
            mythologies,
            gods,
            aliases,
        } => println!(
            "Seeded {} mythologies, {} gods, {} aliases",
            mythologies, gods, aliases
        ),
        SeedOutcome::AlreadyPresent => println!("Store already seeded, nothing to do"),
    }

    store.close().await;
    Ok(())
}
