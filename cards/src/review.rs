//! Scoring of a completed review session.
//!
//! Each answered card moves the user's rating by one point: up when answered
//! correctly, down otherwise. A session with no wrong answers counts as the
//! pack being mastered.

use serde::{Deserialize, Serialize};

/// One answered card as submitted by the client.
///
/// `card_id` is kept as the raw submitted string; resolving it to a card is
/// the caller's job and does not affect scoring. A missing `correct` reads
/// as a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub card_id: String,
    #[serde(default)]
    pub correct: bool,
}

impl ReviewEntry {
    pub fn new(card_id: impl Into<String>, correct: bool) -> Self {
        Self {
            card_id: card_id.into(),
            correct,
        }
    }
}

/// Result of scoring a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionScore {
    pub correct: u32,
    pub incorrect: u32,
}

impl SessionScore {
    /// Signed rating change: correct answers minus incorrect answers.
    pub fn delta(&self) -> i64 {
        i64::from(self.correct) - i64::from(self.incorrect)
    }

    /// True when nothing was answered wrong. An empty session qualifies.
    pub fn all_correct(&self) -> bool {
        self.incorrect == 0
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

pub fn score_session(entries: &[ReviewEntry]) -> SessionScore {
    entries
        .iter()
        .fold(SessionScore::default(), |mut score, entry| {
            if entry.correct {
                score.correct += 1;
            } else {
                score.incorrect += 1;
            }
            score
        })
}
