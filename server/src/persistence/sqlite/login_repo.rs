//! SQLite-backed implementation of [`LoginSessionRepository`].

use cards::UserId;
use sqlx::SqlitePool;

use super::helpers::{classify_sqlx_error, decode_uuid};
use crate::persistence::traits::LoginSessionRepository;
use crate::persistence::{LoginSessionData, PersistenceError};

pub struct SqliteLoginSessionRepository {
    pool: SqlitePool,
}

impl SqliteLoginSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LoginSessionRepository for SqliteLoginSessionRepository {
    async fn create_login(&self, data: &LoginSessionData) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO login_sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.token)
        .bind(data.user_id.to_string())
        .bind(data.created_at as i64)
        .bind(data.expires_at as i64)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        Ok(())
    }

    async fn find_active(&self, token: &str, now: u64) -> Result<Option<UserId>, PersistenceError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM login_sessions WHERE token = ? AND expires_at > ?")
                .bind(token)
                .bind(now as i64)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(raw,)| decode_uuid("login_sessions.user_id", &raw).map(UserId::from))
            .transpose()
    }

    async fn delete_login(&self, token: &str) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM login_sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self, now: u64) -> Result<u64, PersistenceError> {
        let result = sqlx::query("DELETE FROM login_sessions WHERE expires_at <= ?")
            .bind(now as i64)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqliteUserRepository};
    use crate::persistence::traits::UserRepository;
    use cards::NewUser;

    async fn setup() -> (Database, SqliteLoginSessionRepository, UserId) {
        let db = Database::new_in_memory().await.unwrap();
        let users = SqliteUserRepository::new(db.pool().clone());
        let user = users
            .create_user(&NewUser::new("erin", "hash".to_string()).unwrap())
            .await
            .unwrap();
        let repo = SqliteLoginSessionRepository::new(db.pool().clone());
        (db, repo, user.id)
    }

    fn login(token: &str, user_id: UserId, expires_at: u64) -> LoginSessionData {
        LoginSessionData {
            token: token.to_string(),
            user_id,
            created_at: 100,
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_active_session_resolves_user() {
        let (_db, repo, user_id) = setup().await;
        repo.create_login(&login("tok", user_id, 1_000)).await.unwrap();

        assert_eq!(repo.find_active("tok", 500).await.unwrap(), Some(user_id));
        assert_eq!(repo.find_active("other", 500).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_session_does_not_resolve() {
        let (_db, repo, user_id) = setup().await;
        repo.create_login(&login("tok", user_id, 1_000)).await.unwrap();

        assert_eq!(repo.find_active("tok", 1_000).await.unwrap(), None);
        assert_eq!(repo.find_active("tok", 5_000).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_login() {
        let (_db, repo, user_id) = setup().await;
        repo.create_login(&login("tok", user_id, 1_000)).await.unwrap();
        repo.delete_login("tok").await.unwrap();
        assert_eq!(repo.find_active("tok", 500).await.unwrap(), None);

        // Deleting an unknown token is not an error
        repo.delete_login("tok").await.unwrap();
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_sessions() {
        let (_db, repo, user_id) = setup().await;
        repo.create_login(&login("old", user_id, 100)).await.unwrap();
        repo.create_login(&login("live", user_id, 10_000)).await.unwrap();

        assert_eq!(repo.purge_expired(5_000).await.unwrap(), 1);
        assert_eq!(repo.find_active("live", 5_000).await.unwrap(), Some(user_id));
    }
}
