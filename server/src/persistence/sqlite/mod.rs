//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: allows one writer and multiple concurrent readers.
//! - **Foreign keys enabled**: required for card → pack integrity and the
//!   pack → cards cascade.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   automatically when [`Database::open`] is called. The schema is idempotent.
//!
//! ## Repository types
//!
//! Each `Sqlite*Repository` holds a `SqlitePool` and implements the
//! corresponding trait from [`crate::persistence::traits`]:
//!
//! | Type | Trait |
//! |------|-------|
//! | [`SqliteUserRepository`] | `UserRepository` |
//! | [`SqlitePackRepository`] | `PackRepository` |
//! | [`SqliteCardRepository`] | `CardRepository` |
//! | [`SqliteStatsRepository`] | `StatsRepository` |
//! | [`SqliteLoginSessionRepository`] | `LoginSessionRepository` |
//!
//! Identifiers are stored as hyphenated UUID `TEXT` and booleans as `0`/`1`
//! integers, round-tripped through the shared helpers in [`helpers`].

mod card_repo;
mod database;
mod login_repo;
mod pack_repo;
mod stats_repo;
mod user_repo;
pub(crate) mod helpers;

pub use card_repo::SqliteCardRepository;
pub use database::Database;
pub use login_repo::SqliteLoginSessionRepository;
pub use pack_repo::SqlitePackRepository;
pub use stats_repo::SqliteStatsRepository;
pub use user_repo::SqliteUserRepository;
