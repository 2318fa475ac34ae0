//! Gods command: print gods straight from the store

use anyhow::{Context, Result};
use clap::Parser;

use mythapi_server::models::{God, GodName};
use mythapi_server::Store;

use crate::config::StorageArgs;

#[derive(Parser, Debug)]
pub struct GodsArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Only gods with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Match --name against aliases too, and print aliases
    #[arg(long)]
    pub aliases: bool,
}

fn render(god: &God, with_aliases: bool) -> String {
    let mut out = god.to_string();
    if with_aliases && !god.aliases.is_empty() {
        let names: Vec<&str> = god.aliases.iter().map(|a| a.name.as_str()).collect();
        out.push_str(&format!("Aliases: {}\n", names.join(", ")));
    }
    out
}

pub async fn run_gods(args: GodsArgs) -> Result<()> {
    let backend = args.storage.backend()?;
    let store = Store::open(backend).await.context("Failed to open store")?;
    let repo = store.gods();

    let gods = match &args.name {
        Some(name) => {
            let name = GodName::new(name)?;
            repo.get_by_name(&name, args.aliases).await?
        }
        None => repo.get_all().await?,
    };

    if gods.is_empty() {
        println!("No gods found");
    }
    for god in &gods {
        println!("{}", render(god, args.aliases));
    }

    store.close().await;
    Ok(())
}
