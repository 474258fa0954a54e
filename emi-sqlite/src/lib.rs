#![warn(missing_docs)]
//! SQLite adapter for the electricity-market insights service.
//!
//! Implements the [`emi_core::ports::MarketDataSource`] port on top of a
//! SQLite database, plus the write-side helpers the seeding command and
//! the test suites use to populate it. Reads and writes go through
//! separate connection pools following SQLite WAL-mode practice.

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// Failures produced by this adapter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from SQLite operations
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Error during database migrations
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A stored market name no longer parses; the database is corrupt
    #[error("unknown market `{0}` in market_data")]
    UnknownMarket(String),
}

/// SQLite database with split read/write connection pools.
///
/// - `reader`: a pool for read operations, allowing concurrent reads
/// - `writer`: a single-connection pool, serializing writes
///
/// Cloning is cheap; both pools are internally reference-counted.
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates the database if missing (when `create_if_missing` is set)
    /// and applies any pending migrations before returning. The database
    /// runs in WAL mode with the usual server-workload pragmas.
    pub async fn open(config: &SqliteConfig) -> Result<Self, Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let mut options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        // an in-memory database is per-connection unless the cache is
        // shared, and we hold two pools
        if db_path.is_none() {
            options = options.shared_cache(true);
        }

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        // Run any pending migrations before returning
        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}
