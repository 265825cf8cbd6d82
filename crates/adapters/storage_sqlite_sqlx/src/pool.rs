//! Connection pool for the `users` database.
//!
//! [`Config`] doubles as the `[database]` table of the daemon's config file.
//! File databases get a WAL journal and a sized pool; in-memory databases are
//! pinned to a single connection that never idles out, since the data lives
//! only as long as a connection does.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

const DEFAULT_URL: &str = "sqlite:portal.db?mode=rwc";

/// Database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// sqlx `SQLite` URL, e.g. `sqlite:portal.db?mode=rwc` or `sqlite::memory:`.
    pub url: String,
    /// Upper bound on pooled connections. Ignored for in-memory databases.
    pub max_connections: u32,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            max_connections: 5,
            busy_timeout_ms: 5_000,
        }
    }
}

impl Config {
    /// A private in-memory database, used by tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        if self.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(self.max_connections.max(1))
        }
    }

    fn connect_options(&self) -> Result<SqliteConnectOptions, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_millis(self.busy_timeout_ms));

        Ok(if self.is_in_memory() {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        })
    }

    /// Open the pool and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed, the database cannot
    /// be opened, or a migration fails.
    pub async fn open(&self) -> Result<Database, StorageError> {
        let pool = self
            .pool_options()
            .connect_with(self.connect_options()?)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(
            url = %self.url,
            in_memory = self.is_in_memory(),
            "database ready"
        );

        Ok(Database { pool })
    }
}

/// An open, migrated database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for in-flight queries, then close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
