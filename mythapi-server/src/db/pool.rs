//! Database connection pool management
//!
//! Every backend is reached through sqlx's `Any` driver so the repositories
//! carry a single SQL code path. SQL text uses `$N` placeholders, which both
//! the SQLite and PostgreSQL drivers accept.

use std::fmt;
use std::path::PathBuf;

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;

/// Default maximum connections for file and server backends.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which storage engine backs the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// SQLite in-memory database, gone when the process exits
    Memory,
    /// SQLite database file, created if missing
    Sqlite { path: PathBuf },
    /// PostgreSQL server
    Postgres { url: String },
}

/// SQL dialect, only needed where DDL differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl StorageBackend {
    /// Connection URL understood by the `Any` driver.
    pub fn connection_url(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_string(),
            Self::Sqlite { path } => format!("sqlite://{}?mode=rwc", path.display()),
            Self::Postgres { url } => url.clone(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Memory | Self::Sqlite { .. } => Dialect::Sqlite,
            Self::Postgres { .. } => Dialect::Postgres,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "in-memory SQLite"),
            Self::Sqlite { path } => write!(f, "SQLite at {}", path.display()),
            // Never print the URL: it may carry a password
            Self::Postgres { .. } => write!(f, "PostgreSQL"),
        }
    }
}

/// Create a connection pool for the given backend.
///
/// The in-memory backend is pinned to a single connection that never idles
/// out, because each SQLite `:memory:` connection is a separate database.
///
/// # Errors
///
/// Returns an error if the initial connection fails.
pub async fn create_pool(backend: &StorageBackend) -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();

    let options = match backend {
        StorageBackend::Memory => AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None),
        _ => AnyPoolOptions::new().max_connections(DEFAULT_MAX_CONNECTIONS),
    };

    let options = if backend.dialect() == Dialect::Sqlite {
        // Cascades only fire when foreign keys are enforced on the connection
        options.after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON")
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
    } else {
        options
    };

    tracing::debug!(backend = %backend, "connecting to store");
    options.connect(&backend.connection_url()).await
}
