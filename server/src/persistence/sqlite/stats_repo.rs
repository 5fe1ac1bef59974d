//! SQLite-backed implementation of [`StatsRepository`].
//!
//! Increments are single upsert statements so concurrent sessions of the
//! same user never lose an update, and a user whose stats row is missing
//! gets one on first write.

use cards::{UserId, UserStats};
use sqlx::SqlitePool;

use super::helpers::classify_sqlx_error;
use crate::persistence::traits::StatsRepository;
use crate::persistence::PersistenceError;

pub struct SqliteStatsRepository {
    pool: SqlitePool,
}

impl SqliteStatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StatsRepository for SqliteStatsRepository {
    async fn load_stats(&self, user_id: UserId) -> Result<Option<UserStats>, PersistenceError> {
        let row: Option<(i64, i64, i64)> = sqlx::query_as(
            "SELECT rating, packs_created, packs_mastered FROM user_stats WHERE user_id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(rating, packs_created, packs_mastered)| UserStats {
            rating,
            packs_created,
            packs_mastered,
        }))
    }

    async fn increment_packs_created(&self, user_id: UserId) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, packs_created) VALUES (?, 1)
            ON CONFLICT(user_id) DO UPDATE SET packs_created = packs_created + 1
            "#,
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        Ok(())
    }

    async fn record_session(
        &self,
        user_id: UserId,
        delta: i64,
        mastered: bool,
    ) -> Result<(), PersistenceError> {
        let mastered: i64 = if mastered { 1 } else { 0 };

        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, rating, packs_mastered) VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                rating = rating + excluded.rating,
                packs_mastered = packs_mastered + excluded.packs_mastered
            "#,
        )
        .bind(user_id.to_string())
        .bind(delta)
        .bind(mastered)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqliteUserRepository};
    use crate::persistence::traits::UserRepository;
    use cards::NewUser;

    async fn setup() -> (Database, SqliteStatsRepository, UserId) {
        let db = Database::new_in_memory().await.unwrap();
        let users = SqliteUserRepository::new(db.pool().clone());
        let user = users
            .create_user(&NewUser::new("dana", "hash".to_string()).unwrap())
            .await
            .unwrap();
        (db.clone(), SqliteStatsRepository::new(db.pool().clone()), user.id)
    }

    #[tokio::test]
    async fn test_new_user_has_zero_stats() {
        let (_db, repo, user_id) = setup().await;
        assert_eq!(
            repo.load_stats(user_id).await.unwrap(),
            Some(UserStats::default())
        );
    }

    #[tokio::test]
    async fn test_missing_row_loads_as_none() {
        let (_db, repo, _user_id) = setup().await;
        assert_eq!(repo.load_stats(UserId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_session_accumulates() {
        let (_db, repo, user_id) = setup().await;

        repo.record_session(user_id, 3, true).await.unwrap();
        repo.record_session(user_id, -5, false).await.unwrap();
        repo.record_session(user_id, 1, true).await.unwrap();

        let stats = repo.load_stats(user_id).await.unwrap().unwrap();
        assert_eq!(stats.rating, -1);
        assert_eq!(stats.packs_mastered, 2);
        assert_eq!(stats.packs_created, 0);
    }

    #[tokio::test]
    async fn test_increment_packs_created() {
        let (_db, repo, user_id) = setup().await;

        repo.increment_packs_created(user_id).await.unwrap();
        repo.increment_packs_created(user_id).await.unwrap();

        let stats = repo.load_stats(user_id).await.unwrap().unwrap();
        assert_eq!(stats.packs_created, 2);
    }

    #[tokio::test]
    async fn test_increment_recreates_missing_row() {
        let (db, repo, user_id) = setup().await;
        sqlx::query("DELETE FROM user_stats WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(db.pool())
            .await
            .unwrap();

        repo.record_session(user_id, 2, false).await.unwrap();

        let stats = repo.load_stats(user_id).await.unwrap().unwrap();
        assert_eq!(stats.rating, 2);
        assert_eq!(stats.packs_mastered, 0);
    }

    #[tokio::test]
    async fn test_unknown_user_is_fk_violation() {
        let (_db, repo, _user_id) = setup().await;
        let result = repo.record_session(UserId::new(), 1, true).await;
        assert!(matches!(result, Err(PersistenceError::ForeignKeyViolation(_))));
    }
}
