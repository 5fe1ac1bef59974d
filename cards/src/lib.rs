//! Domain types for DailyCards: identifiers, records, input validation and
//! review-session scoring. This crate does no I/O.

pub mod ids;
pub mod model;
pub mod review;
pub mod validate;

pub use ids::{CardId, PackId, UserId};
pub use model::{Card, NewCard, NewPack, NewUser, Pack, User, UserStats};
pub use review::{score_session, ReviewEntry, SessionScore};
pub use validate::ValidationError;
