//! Storage selection shared by every subcommand
//!
//! Values come from flags, then environment variables (a `.env` file is
//! loaded at startup), then defaults.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use mythapi_server::StorageBackend;

/// Storage engine names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// In-memory SQLite, discarded on exit
    Memory,
    /// SQLite database file
    Sqlite,
    /// PostgreSQL server
    Postgres,
}

#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// Storage engine backing the API
    #[arg(long, value_enum, env = "MYTHAPI_STORAGE", default_value = "sqlite")]
    pub storage: StorageKind,

    /// Shorthand for --storage memory
    #[arg(long)]
    pub in_memory_database: bool,

    /// SQLite database file (sqlite storage)
    #[arg(long, env = "MYTHAPI_SQLITE_PATH", default_value = "mythapi.db")]
    pub sqlite_path: PathBuf,

    /// PostgreSQL connection URL (postgres storage)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl StorageArgs {
    /// Resolve the arguments into a concrete backend.
    pub fn backend(&self) -> Result<StorageBackend> {
        let kind = if self.in_memory_database {
            StorageKind::Memory
        } else {
            self.storage
        };

        Ok(match kind {
            StorageKind::Memory => StorageBackend::Memory,
            StorageKind::Sqlite => StorageBackend::Sqlite {
                path: self.sqlite_path.clone(),
            },
            StorageKind::Postgres => match &self.database_url {
                Some(url) if !url.trim().is_empty() => StorageBackend::Postgres { url: url.clone() },
                _ => bail!(
                    "postgres storage needs a connection URL. Set via --database-url or DATABASE_URL"
                ),
            },
        })
    }
}
