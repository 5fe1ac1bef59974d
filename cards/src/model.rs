use serde::{Deserialize, Serialize};

use crate::ids::{CardId, PackId, UserId};
use crate::validate::{self, ValidationError};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub created_at: u64,
}

/// Validated input for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: &str, password_hash: String) -> Result<Self, ValidationError> {
        Ok(Self {
            username: validate::username(username)?.to_string(),
            password_hash,
        })
    }
}

/// A named collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,
    pub name: String,
    pub category: Option<String>,
    pub created_at: u64,
}

#[derive(Debug, Clone)]
pub struct NewPack {
    pub name: String,
    pub category: Option<String>,
}

impl NewPack {
    pub fn new(name: &str, category: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate::required("name", name)?.to_string(),
            category: validate::optional(category),
        })
    }
}

/// A question/answer card.
///
/// `last_wrong` records whether the card was answered incorrectly in the most
/// recent review session that included it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub pack_id: PackId,
    pub question: String,
    pub answer: String,
    pub rating: i32,
    pub last_wrong: bool,
    pub created_at: u64,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub pack_id: PackId,
    pub question: String,
    pub answer: String,
    pub rating: i32,
}

impl NewCard {
    pub fn new(
        pack_id: PackId,
        question: &str,
        answer: &str,
        rating: Option<i32>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            pack_id,
            question: validate::required("question", question)?.to_string(),
            answer: validate::required("answer", answer)?.to_string(),
            rating: rating.unwrap_or(0),
        })
    }
}

/// Aggregate per-user statistics. The default value is the all-zero record
/// reported for users without any recorded activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub rating: i64,
    pub packs_created: i64,
    pub packs_mastered: i64,
}
