//! Request and response bodies for the JSON API.
//!
//! Request fields default to empty so that a missing field is reported by
//! validation ("name must not be empty") rather than as a decode failure.

use cards::{Card, CardId, Pack, PackId, ReviewEntry, UserStats};
use serde::{Deserialize, Serialize};

// ── requests ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub rating: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct FinishPackRequest {
    #[serde(default)]
    pub stats: Vec<ReviewEntry>,
}

// ── responses ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedPackResponse {
    pub message: String,
    pub id: PackId,
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PackResponse {
    pub id: PackId,
    pub name: String,
    pub category: Option<String>,
}

impl From<Pack> for PackResponse {
    fn from(pack: Pack) -> Self {
        Self {
            id: pack.id,
            name: pack.name,
            category: pack.category,
        }
    }
}

/// A freshly created card, with every stored field.
#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: CardId,
    pub pack_id: PackId,
    pub question: String,
    pub answer: String,
    pub rating: i32,
    pub last_wrong: bool,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            pack_id: card.pack_id,
            question: card.question,
            answer: card.answer,
            rating: card.rating,
            last_wrong: card.last_wrong,
        }
    }
}

/// A card as listed in its pack.
#[derive(Debug, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub rating: i32,
}

impl From<Card> for CardSummary {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            question: card.question,
            answer: card.answer,
            rating: card.rating,
        }
    }
}

/// A card handed out for a review session.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewCardResponse {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub rating: i32,
    pub last_wrong: bool,
}

impl From<Card> for ReviewCardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            question: card.question,
            answer: card.answer,
            rating: card.rating,
            last_wrong: card.last_wrong,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub rating: i64,
    pub packs_created: i64,
    pub packs_mastered: i64,
}

impl From<UserStats> for StatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            rating: stats.rating,
            packs_created: stats.packs_created,
            packs_mastered: stats.packs_mastered,
        }
    }
}
