//! Async repository trait definitions for the persistence layer.
//!
//! Each trait abstracts over one aggregate so the review engine and the
//! HTTP layer can be exercised against test doubles via static dispatch.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, which axum handlers require.

use super::{LoginSessionData, PersistenceError};
use cards::{Card, CardId, NewCard, NewPack, NewUser, Pack, PackId, User, UserId, UserStats};
use std::future::Future;

/// Repository for user accounts.
///
/// `create_user` must create the user's zeroed stats row in the same
/// transaction as the user row.
pub trait UserRepository: Send + Sync {
    fn create_user(
        &self,
        data: &NewUser,
    ) -> impl Future<Output = Result<User, PersistenceError>> + Send;
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, PersistenceError>> + Send;
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PersistenceError>> + Send;
}

/// Repository for packs. Pack names are unique.
pub trait PackRepository: Send + Sync {
    fn create_pack(
        &self,
        data: &NewPack,
    ) -> impl Future<Output = Result<Pack, PersistenceError>> + Send;
    fn list_packs(&self) -> impl Future<Output = Result<Vec<Pack>, PersistenceError>> + Send;
    /// Returns whether a pack was removed. Cards go with it.
    fn delete_pack(&self, id: PackId)
        -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}

/// Repository for cards.
pub trait CardRepository: Send + Sync {
    /// Fails with `ForeignKeyViolation` when the pack does not exist.
    fn create_card(
        &self,
        data: &NewCard,
    ) -> impl Future<Output = Result<Card, PersistenceError>> + Send;
    fn list_cards(
        &self,
        pack_id: PackId,
    ) -> impl Future<Output = Result<Vec<Card>, PersistenceError>> + Send;
    fn delete_card(
        &self,
        pack_id: PackId,
        card_id: CardId,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    /// Cards of a pack in review order: previously-wrong cards first.
    fn list_review_cards(
        &self,
        pack_id: PackId,
    ) -> impl Future<Output = Result<Vec<Card>, PersistenceError>> + Send;
    /// Returns whether a card of that pack was updated.
    fn set_last_wrong(
        &self,
        pack_id: PackId,
        card_id: CardId,
        last_wrong: bool,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}

/// Repository for per-user statistics.
///
/// Increments must be applied atomically in the datastore, never as a
/// read-modify-write in the caller.
pub trait StatsRepository: Send + Sync {
    fn load_stats(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<UserStats>, PersistenceError>> + Send;
    fn increment_packs_created(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Add `delta` to the rating and, if `mastered`, one to `packs_mastered`.
    fn record_session(
        &self,
        user_id: UserId,
        delta: i64,
        mastered: bool,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

/// Repository for cookie login sessions.
pub trait LoginSessionRepository: Send + Sync {
    fn create_login(
        &self,
        data: &LoginSessionData,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Resolve a token that has not expired at `now`.
    fn find_active(
        &self,
        token: &str,
        now: u64,
    ) -> impl Future<Output = Result<Option<UserId>, PersistenceError>> + Send;
    fn delete_login(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Remove every session expired at `now`; returns how many were removed.
    fn purge_expired(&self, now: u64)
        -> impl Future<Output = Result<u64, PersistenceError>> + Send;
}
