//! SQLite-backed key/value store.

use std::path::Path;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::kv::{KeyValueStore, StoreError};

/// Key/value store on a local SQLite database.
///
/// `SqlitePool` is `Send + Sync` and cheap to clone, so the store is too.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        tracing::debug!(path = %path.display(), "opened sqlite key/value store");
        Self::with_pool(pool).await
    }

    /// Private in-memory database.
    ///
    /// Pinned to a single connection that is never recycled: every new
    /// connection to `sqlite::memory:` would see an empty database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    /// Use an existing pool, creating the table if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key        TEXT PRIMARY KEY NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT value
            FROM kv_entries
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn in_memory_round_trip() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "first".to_string()).await.unwrap();
        store.set("k", "second".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn set_stamps_updated_at_as_timestamp() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();
        let before = Utc::now() - chrono::Duration::seconds(1);
        store.set("k", "v".to_string()).await.unwrap();

        let row = sqlx::query("SELECT updated_at FROM kv_entries WHERE key = ?1")
            .bind("k")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        let stamped: chrono::DateTime<Utc> = row.try_get("updated_at").unwrap();
        assert!(stamped >= before);
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("gatehouse.db");

        {
            let store = SqliteKeyValueStore::open(&path).await.unwrap();
            store.set("@ns:key", "[]".to_string()).await.unwrap();
            store.pool.close().await;
        }

        let reopened = SqliteKeyValueStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("@ns:key").await.unwrap().as_deref(), Some("[]"));
    }
}
