//! Review session and statistics endpoints

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cards::PackId;

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::service::types::{FinishPackRequest, ReviewCardResponse, StatsResponse};
use crate::state::AppState;

pub async fn repeat_pack(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(pack_id): Path<String>,
) -> Result<Json<Vec<ReviewCardResponse>>, ApiError> {
    auth.require_user()?;
    let pack_id = PackId::parse(&pack_id)?;

    let cards = state.review.repeat_pack(&auth, pack_id).await?;
    Ok(Json(cards.into_iter().map(ReviewCardResponse::from).collect()))
}

/// Partial failures are logged; the caller always gets 204 once the
/// session has been scored.
pub async fn finish_pack(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(pack_id): Path<String>,
    payload: Result<Json<FinishPackRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    auth.require_user()?;
    let pack_id = PackId::parse(&pack_id)?;
    let Json(req) = payload?;

    let outcome = state.review.finish_pack(&auth, pack_id, &req.stats).await?;
    if !outcome.is_complete() {
        tracing::warn!(
            pack_id = %pack_id,
            failed_cards = ?outcome.failed_cards,
            stats_recorded = outcome.stats_recorded,
            "Review session applied partially"
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.review.user_stats(&auth).await?;
    Ok(Json(stats.into()))
}
