//! mythapi-server: HTTP API for mythological gods
//!
//! Serves gods, their aliases and the mythologies they belong to from a
//! relational store (in-memory SQLite, SQLite file or PostgreSQL), seeded
//! with the Norse, Greek and Roman pantheons.

pub mod db;
pub mod http;
pub mod models;

pub use db::{SeedOutcome, StorageBackend, Store};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
