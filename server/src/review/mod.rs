//! Review sessions and the statistics they feed.
//!
//! [`ReviewService`] owns the one piece of real domain logic in the service:
//! applying a finished review session. Card flag updates and the aggregate
//! stats update are best-effort. Their failures are collected into the
//! returned [`SessionOutcome`] instead of failing the request.

use cards::{score_session, Card, CardId, PackId, ReviewEntry, SessionScore, UserId, UserStats};

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::persistence::{CardRepository, PersistenceError, StatsRepository};

/// What happened while applying a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub score: SessionScore,
    /// Submitted card ids whose `last_wrong` flag could not be updated:
    /// malformed, not in the pack, or a failed write.
    pub failed_cards: Vec<String>,
    /// Whether the rating/mastery update reached the datastore.
    pub stats_recorded: bool,
}

impl SessionOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_cards.is_empty() && self.stats_recorded
    }
}

pub struct ReviewService<C, S> {
    cards: C,
    stats: S,
}

impl<C: CardRepository, S: StatsRepository> ReviewService<C, S> {
    pub fn new(cards: C, stats: S) -> Self {
        Self { cards, stats }
    }

    /// Apply a completed review session for the authenticated user.
    ///
    /// Every entry counts toward the rating delta, including entries whose
    /// card could not be updated.
    pub async fn finish_pack(
        &self,
        auth: &AuthContext,
        pack_id: PackId,
        entries: &[ReviewEntry],
    ) -> Result<SessionOutcome, ApiError> {
        let user_id = auth.require_user()?;
        let score = score_session(entries);

        let mut failed_cards = Vec::new();
        for entry in entries {
            if !self.mark_card(pack_id, entry).await {
                failed_cards.push(entry.card_id.clone());
            }
        }

        let stats_recorded = match self
            .stats
            .record_session(user_id, score.delta(), score.all_correct())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id = %user_id, delta = score.delta(), "Failed to record session stats: {}", e);
                false
            }
        };

        tracing::info!(
            user_id = %user_id,
            pack_id = %pack_id,
            answered = score.total(),
            delta = score.delta(),
            mastered = score.all_correct(),
            "Review session finished"
        );

        Ok(SessionOutcome {
            score,
            failed_cards,
            stats_recorded,
        })
    }

    /// Returns whether the card's flag was updated.
    async fn mark_card(&self, pack_id: PackId, entry: &ReviewEntry) -> bool {
        let Ok(card_id) = CardId::parse(&entry.card_id) else {
            tracing::debug!(card_id = %entry.card_id, "Skipping malformed card id");
            return false;
        };

        match self
            .cards
            .set_last_wrong(pack_id, card_id, !entry.correct)
            .await
        {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!(pack_id = %pack_id, card_id = %card_id, "Card not in pack");
                false
            }
            Err(e) => {
                tracing::warn!(pack_id = %pack_id, card_id = %card_id, "Failed to update card: {}", e);
                false
            }
        }
    }

    /// Cards for a new review session, previously-wrong cards first.
    pub async fn repeat_pack(
        &self,
        auth: &AuthContext,
        pack_id: PackId,
    ) -> Result<Vec<Card>, ApiError> {
        auth.require_user()?;
        Ok(self.cards.list_review_cards(pack_id).await?)
    }

    /// The caller's stats; all zeros when nothing has been recorded.
    pub async fn user_stats(&self, auth: &AuthContext) -> Result<UserStats, ApiError> {
        let user_id = auth.require_user()?;
        Ok(self.stats.load_stats(user_id).await?.unwrap_or_default())
    }

    /// Count a newly created pack toward the creator's stats.
    pub async fn record_pack_created(&self, user_id: UserId) -> Result<(), PersistenceError> {
        self.stats.increment_packs_created(user_id).await
    }
}
