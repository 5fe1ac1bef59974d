use crate::auth::SessionSettings;
use crate::persistence::sqlite::{
    Database, SqliteCardRepository, SqliteLoginSessionRepository, SqlitePackRepository,
    SqliteStatsRepository, SqliteUserRepository,
};
use crate::review::ReviewService;

pub type Review = ReviewService<SqliteCardRepository, SqliteStatsRepository>;

/// Shared state handed to every handler.
pub struct AppState {
    pub users: SqliteUserRepository,
    pub packs: SqlitePackRepository,
    pub cards: SqliteCardRepository,
    pub logins: SqliteLoginSessionRepository,
    pub review: Review,
    pub sessions: SessionSettings,
}

impl AppState {
    pub fn new(db: &Database, sessions: SessionSettings) -> Self {
        let pool = db.pool();
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            packs: SqlitePackRepository::new(pool.clone()),
            cards: SqliteCardRepository::new(pool.clone()),
            logins: SqliteLoginSessionRepository::new(pool.clone()),
            review: ReviewService::new(
                SqliteCardRepository::new(pool.clone()),
                SqliteStatsRepository::new(pool.clone()),
            ),
            sessions,
        }
    }
}
