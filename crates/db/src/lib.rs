//! SQLite-backed record store for notelet pages.
//!
//! Owns pool construction, store bootstrap, and the repository layer. The
//! `pages.url` UNIQUE constraint here is the authoritative guard against
//! duplicate urls; callers treat any pre-check as advisory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Connection, ConnectOptions, SqliteConnection};

pub mod models;
pub mod repositories;

/// Shared connection pool type.
pub type DbPool = sqlx::SqlitePool;

/// Schema for the `pages` table.
///
/// `AUTOINCREMENT` keeps ids monotonically increasing and never reused,
/// even across deletes. The UNIQUE constraint on `url` is load-bearing:
/// concurrent writers racing past the advisory existence check are stopped
/// here.
const SCHEMA: &str = "CREATE TABLE pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    url TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    author TEXT NOT NULL DEFAULT '',
    edit_code TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    last_accessed_at TEXT NOT NULL
)";

/// Open a pool over an existing store file.
///
/// Refuses to create a missing file: serving requires a store that went
/// through [`initialize_store`] first. The busy timeout bounds how long any
/// single statement may wait on a writer lock.
pub async fn create_pool(path: &Path) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Verify the store is reachable and has the expected table.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT COUNT(*) FROM pages")
        .execute(pool)
        .await
        .map(|_| ())
}

/// Failure modes of [`initialize_store`].
#[derive(Debug, thiserror::Error)]
pub enum InitStoreError {
    #[error("store file '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Create a fresh store at `path` and seed one sample page.
///
/// Fails with [`InitStoreError::AlreadyExists`] if anything is already at
/// that location; an existing store is never touched.
pub async fn initialize_store(path: &Path) -> Result<(), InitStoreError> {
    if path.exists() {
        return Err(InitStoreError::AlreadyExists(path.to_path_buf()));
    }

    let mut conn: SqliteConnection = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await?;

    let seed_content = "This is the first post.";
    let now = Utc::now();

    let mut tx = conn.begin().await?;
    sqlx::query(SCHEMA).execute(&mut *tx).await?;
    sqlx::query(
        "INSERT INTO pages (title, url, content, description, author, edit_code, created_at, last_accessed_at)
         VALUES (?, ?, ?, ?, '', '', ?, ?)",
    )
    .bind("First Post!")
    .bind("firstpost")
    .bind(seed_content)
    .bind(notelet_core::excerpt::derive_description(seed_content))
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    conn.close().await?;
    tracing::info!(path = %path.display(), "Initialized page store");
    Ok(())
}
