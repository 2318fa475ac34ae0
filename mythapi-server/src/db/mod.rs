//! Database layer - connection pool, schema, seeding and repositories
//!
//! # Design Principles
//!
//! - One sqlx `Any` pool; the backend is chosen by configuration, not by code paths
//! - List operations load aliases in one extra query - no N+1 queries
//! - Referential integrity enforced by FOREIGN KEY ... ON DELETE CASCADE
//! - Transactions for multi-step operations (batch upsert, seeding)

pub mod pool;
pub mod repos;
pub mod schema;
pub mod seed;
pub mod store;

pub use pool::{create_pool, Dialect, StorageBackend};
pub use repos::*;
pub use seed::{seed_reference_data, SeedOutcome};
pub use store::Store;
