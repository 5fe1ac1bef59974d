//! SQLite-backed implementation of [`PackRepository`].

use cards::{NewPack, Pack, PackId};
use sqlx::SqlitePool;

use super::helpers::{classify_sqlx_error, decode_uuid};
use crate::persistence::traits::PackRepository;
use crate::persistence::{now_timestamp, PersistenceError};

#[derive(sqlx::FromRow)]
struct PackRow {
    id: String,
    name: String,
    category: Option<String>,
    created_at: i64,
}

impl TryFrom<PackRow> for Pack {
    type Error = PersistenceError;

    fn try_from(row: PackRow) -> Result<Self, Self::Error> {
        Ok(Pack {
            id: PackId::from(decode_uuid("packs.id", &row.id)?),
            name: row.name,
            category: row.category,
            created_at: row.created_at as u64,
        })
    }
}

pub struct SqlitePackRepository {
    pool: SqlitePool,
}

impl SqlitePackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PackRepository for SqlitePackRepository {
    async fn create_pack(&self, data: &NewPack) -> Result<Pack, PersistenceError> {
        let pack = Pack {
            id: PackId::new(),
            name: data.name.clone(),
            category: data.category.clone(),
            created_at: now_timestamp(),
        };

        sqlx::query("INSERT INTO packs (id, name, category, created_at) VALUES (?, ?, ?, ?)")
            .bind(pack.id.to_string())
            .bind(&pack.name)
            .bind(&pack.category)
            .bind(pack.created_at as i64)
            .execute(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        Ok(pack)
    }

    async fn list_packs(&self) -> Result<Vec<Pack>, PersistenceError> {
        let rows: Vec<PackRow> = sqlx::query_as(
            "SELECT id, name, category, created_at FROM packs ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Pack::try_from).collect()
    }

    async fn delete_pack(&self, id: PackId) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM packs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::Database;

    #[tokio::test]
    async fn test_create_and_list_roundtrip() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqlitePackRepository::new(db.pool().clone());

        let created = repo
            .create_pack(&NewPack::new("German verbs", Some("language")).unwrap())
            .await
            .unwrap();

        let list = repo.list_packs().await.unwrap();
        assert_eq!(list, vec![created]);
        assert_eq!(list[0].category.as_deref(), Some("language"));
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqlitePackRepository::new(db.pool().clone());

        for name in ["b-pack", "a-pack", "c-pack"] {
            repo.create_pack(&NewPack::new(name, None).unwrap())
                .await
                .unwrap();
        }

        let names: Vec<String> = repo
            .list_packs()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["b-pack", "a-pack", "c-pack"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqlitePackRepository::new(db.pool().clone());

        repo.create_pack(&NewPack::new("Capitals", None).unwrap())
            .await
            .unwrap();
        let result = repo
            .create_pack(&NewPack::new("Capitals", Some("geo")).unwrap())
            .await;
        assert!(
            matches!(result, Err(PersistenceError::UniqueViolation(_))),
            "expected UniqueViolation, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqlitePackRepository::new(db.pool().clone());

        let pack = repo
            .create_pack(&NewPack::new("Temp", None).unwrap())
            .await
            .unwrap();

        assert!(repo.delete_pack(pack.id).await.unwrap());
        assert!(!repo.delete_pack(pack.id).await.unwrap());
        assert!(repo.list_packs().await.unwrap().is_empty());
    }
}
