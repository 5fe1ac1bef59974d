//! Persistence layer: repository traits and their SQLite implementations.

pub mod sqlite;
pub mod traits;

pub use traits::{
    CardRepository, LoginSessionRepository, PackRepository, StatsRepository, UserRepository,
};

use cards::UserId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// A stored login session: an opaque cookie token bound to a user until
/// `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSessionData {
    pub token: String,
    pub user_id: UserId,
    pub created_at: u64,
    pub expires_at: u64,
}

/// Get the current unix timestamp in seconds.
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
