//! Connection pool setup. Both constructors funnel through
//! [`Database::connect`], which enables foreign keys and applies the embedded
//! migrations before handing the pool out.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::persistence::PersistenceError;

const FILE_POOL_SIZE: u32 = 5;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file at `path`, creating it and any missing parent
    /// directories.
    pub async fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let db = Self::connect(options, FILE_POOL_SIZE).await?;
        tracing::info!(path = %path.display(), "Database ready");
        Ok(db)
    }

    /// Every `:memory:` connection is its own database, hence a single
    /// connection.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::connect(SqliteConnectOptions::from_str("sqlite::memory:")?, 1).await
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self, PersistenceError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.foreign_keys(true))
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(db: &Database) -> Vec<String> {
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\'")
            .fetch_all(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn in_memory_schema_has_every_table() {
        let db = Database::new_in_memory().await.unwrap();
        let names = table_names(&db).await;
        for table in ["users", "user_stats", "packs", "cards", "login_sessions"] {
            assert!(names.iter().any(|n| n == table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = Database::new_in_memory().await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);

        let orphan = sqlx::query(
            "INSERT INTO cards (id, pack_id, question, answer, rating, last_wrong, created_at)
             VALUES ('c', 'no-such-pack', 'q', 'a', 0, 0, 0)",
        )
        .execute(db.pool())
        .await;
        assert!(orphan.is_err());
    }

    #[tokio::test]
    async fn file_database_uses_wal_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cards.db");
        let db = Database::open(&path).await.unwrap();

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(mode, "wal");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn reopening_keeps_rows_and_reruns_migrations_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.db");

        let db = Database::open(&path).await.unwrap();
        sqlx::query("INSERT INTO packs (id, name, category, created_at) VALUES ('p', 'Kept', NULL, 0)")
            .execute(db.pool())
            .await
            .unwrap();
        db.pool().close().await;

        let db = Database::open(&path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM packs")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
