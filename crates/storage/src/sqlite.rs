//! SQLite record store.
//!
//! Uses a single table keyed by namespace key:
//! - `records(key TEXT PRIMARY KEY, value TEXT, updated_at TEXT)`
//!
//! `set` is a single-statement upsert, so it either fully applies or not at all.

use async_trait::async_trait;
use chrono::Utc;
use mindnest_core::error::StorageError;
use mindnest_core::store::{RecordStore, is_valid_key};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// A SQLite-backed record store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a SQLite store.
    ///
    /// Pass `"sqlite::memory:"` for an in-process ephemeral database (useful for tests).
    pub async fn new(path: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StorageError::write("*", format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        // Every connection to `:memory:` is a separate database.
        let max_connections = if path.contains(":memory:") { 1 } else { 4 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::write("*", format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite record store initialized at {path}");
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                key        TEXT PRIMARY KEY NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::write("*", format!("records table: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::read(key, "invalid key"));
        }

        let row = sqlx::query("SELECT value FROM records WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::read(key, e))?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| StorageError::read(key, format!("value column: {e}")))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::write(key, "invalid key"));
        }

        sqlx::query(
            r#"
            INSERT INTO records (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::write(key, e))?;

        debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM records")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::write("*", e))?;

        debug!(removed = result.rows_affected(), "Record store cleared");
        Ok(())
    }
}
