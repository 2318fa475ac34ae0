//! Repository traits and their SQL implementations
//!
//! Handlers only see the traits, so any storage engine can stand behind them.
//! The SQL implementations follow these patterns:
//! - Aliases are loaded for a whole result set in one query (no N+1)
//! - Referential checks and writes share one transaction

use async_trait::async_trait;

use crate::models::{God, GodInput, GodName, Mythology, ValidationError};

pub mod gods;
pub mod mythologies;

pub use gods::SqlGodRepo;
pub use mythologies::SqlMythologyRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Reads and writes of the god aggregate (a god plus its aliases).
#[async_trait]
pub trait GodRepository: Send + Sync {
    /// Every god ordered by id, aliases included.
    async fn get_all(&self) -> Result<Vec<God>, DbError>;

    /// One god with its aliases, or `NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<God, DbError>;

    /// Gods named exactly `name`. With `include_aliases`, gods having an
    /// alias of that name match too and their aliases are populated.
    /// No match is an empty list, not an error.
    async fn get_by_name(&self, name: &GodName, include_aliases: bool)
        -> Result<Vec<God>, DbError>;

    /// Batch upsert, all-or-nothing. Returns the persisted gods in input order.
    async fn add_or_update(&self, inputs: Vec<GodInput>) -> Result<Vec<God>, DbError>;

    /// Delete one god and its aliases, or `NotFound`.
    async fn delete_by_id(&self, id: i64) -> Result<(), DbError>;

    /// Delete every god and alias. Returns how many gods were removed.
    async fn delete_all(&self) -> Result<u64, DbError>;
}

/// Reads of the mythology aggregate.
#[async_trait]
pub trait MythologyRepository: Send + Sync {
    /// Every mythology ordered by id, with gods and aliases.
    async fn get_all(&self) -> Result<Vec<Mythology>, DbError>;

    /// One mythology with gods and aliases, or `NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<Mythology, DbError>;

    async fn count(&self) -> Result<i64, DbError>;
}
