//! Schema migrations for mythologies, gods and aliases

use sqlx::AnyPool;

use super::pool::Dialect;

const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS mythologies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS gods (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        mythology_id INTEGER NOT NULL REFERENCES mythologies(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS aliases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        god_id INTEGER NOT NULL REFERENCES gods(id) ON DELETE CASCADE,
        name TEXT NOT NULL
    )
    "#,
];

const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS mythologies (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS gods (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        mythology_id BIGINT NOT NULL REFERENCES mythologies(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS aliases (
        id BIGSERIAL PRIMARY KEY,
        god_id BIGINT NOT NULL REFERENCES gods(id) ON DELETE CASCADE,
        name TEXT NOT NULL
    )
    "#,
];

/// Same syntax on both dialects
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_gods_name ON gods(name)",
    "CREATE INDEX IF NOT EXISTS idx_gods_mythology_id ON gods(mythology_id)",
    "CREATE INDEX IF NOT EXISTS idx_aliases_god_id ON aliases(god_id)",
    "CREATE INDEX IF NOT EXISTS idx_aliases_name ON aliases(name)",
];

/// Create tables and indexes if they do not exist yet.
pub async fn migrate(pool: &AnyPool, dialect: Dialect) -> Result<(), sqlx::Error> {
    tracing::info!(?dialect, "Running schema migrations...");

    let tables = match dialect {
        Dialect::Sqlite => SQLITE_SCHEMA,
        Dialect::Postgres => POSTGRES_SCHEMA,
    };

    // One statement per query: prepared statements reject batches on PostgreSQL
    for statement in tables.iter().chain(INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

/// Drop every table, children first.
pub async fn reset(pool: &AnyPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping all tables");

    for table in ["aliases", "gods", "mythologies"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }

    Ok(())
}
