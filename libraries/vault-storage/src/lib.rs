//! Music Vault Storage
//!
//! `SQLite` persistence for per-user playback session documents.
//!
//! # Architecture
//!
//! - **One Document Per User**: the whole session is stored as one JSON row
//! - **Whole-Row Replace**: saves are single upserts, never partial updates
//! - **Last Writer Wins**: no optimistic concurrency between overlapping turns
//!
//! # Example
//!
//! ```rust,no_run
//! use vault_core::{SessionDocument, SessionStore, UserId};
//! use vault_storage::SqliteSessionStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteSessionStore::connect("sqlite://vault.db").await?;
//!
//! let user = UserId::from("amzn1.ask.account.example");
//! store.save(&user, &SessionDocument::default()).await?;
//! assert!(store.load(&user).await?.is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub mod sessions;

pub use error::{Result, StorageError};
pub use store::{MemorySessionStore, SqliteSessionStore};

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Applied versions are recorded in `_sqlx_migrations`, so each migration
/// runs once per database.
///
/// # Errors
///
/// Returns an error if a migration fails to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    debug!(count = MIGRATOR.iter().count(), "Migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://vault.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    debug!(url = database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
