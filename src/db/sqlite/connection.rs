//! SQLite connection pool and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::{SqliteLinkRepository, SqliteProjectRepository, SqliteTagRepository};
use crate::db::{Database, DbConfig, DbError, DbResult};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("data/sql/sqlite");

/// SQLite database implementation.
///
/// Cloning is cheap: the pool is reference counted and every repository
/// handle gets its own clone of it.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if missing) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        info!("Opened SQLite database at {}", path.as_ref().display());
        Ok(Self { pool })
    }

    /// Open the database described by an environment-derived config.
    pub async fn from_config(config: &DbConfig) -> DbResult<Self> {
        Self::open(&config.database).await
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Get the underlying pool.
    ///
    /// Used by tests and seeding code that need direct SQL access.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Projects = SqliteProjectRepository;
    type Tags = SqliteTagRepository;
    type Links = SqliteLinkRepository;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn projects(&self) -> Self::Projects {
        SqliteProjectRepository {
            pool: self.pool.clone(),
        }
    }

    fn tags(&self) -> Self::Tags {
        SqliteTagRepository {
            pool: self.pool.clone(),
        }
    }

    fn links(&self) -> Self::Links {
        SqliteLinkRepository {
            pool: self.pool.clone(),
        }
    }
}
