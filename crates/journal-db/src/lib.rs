//! # Journal DB
//!
//! SQLite connection pool for the journal service.
//!
//! The pool enforces foreign keys on every connection and creates the
//! database file when it does not exist yet. Schema migrations live in the
//! root `migrations/` directory and are applied by the server and the CLI.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use journal_db::init_db_pool;
//!
//! let pool = init_db_pool("journal.db", Duration::from_secs(60)).await?;
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub use sqlx::SqlitePool as DbPool;

const MAX_CONNECTIONS: u32 = 8;

/// Opens a pool over the SQLite database at `storage_path`.
///
/// `storage_path` is either a filesystem path or a full `sqlite:` URL.
/// Connections idle for longer than `idle_timeout` are closed.
pub async fn init_db_pool(storage_path: &str, idle_timeout: Duration) -> Result<DbPool, sqlx::Error> {
    let options = connect_options(storage_path)?;

    tracing::info!(storage_path, "opening SQLite pool");

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .idle_timeout(idle_timeout)
        .connect_with(options)
        .await
}

fn connect_options(storage_path: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = if storage_path.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(storage_path)?
    } else {
        SqliteConnectOptions::new().filename(storage_path)
    };

    Ok(options
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal))
}
