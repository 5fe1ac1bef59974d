//! Card endpoints, nested under their pack

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cards::{CardId, NewCard, PackId};

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::persistence::{CardRepository, PersistenceError};
use crate::service::types::{CardResponse, CardSummary, CreateCardRequest};
use crate::state::AppState;

pub async fn create_card(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(pack_id): Path<String>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CardResponse>), ApiError> {
    auth.require_user()?;
    let pack_id = PackId::parse(&pack_id)?;
    let Json(req) = payload?;
    let new_card = NewCard::new(pack_id, &req.question, &req.answer, req.rating)?;

    let card = state.cards.create_card(&new_card).await.map_err(|e| match e {
        PersistenceError::ForeignKeyViolation(_) => ApiError::NotFound("pack not found".to_string()),
        other => other.into(),
    })?;

    tracing::info!(pack_id = %pack_id, card_id = %card.id, "Card created");
    Ok((StatusCode::CREATED, Json(card.into())))
}

pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(pack_id): Path<String>,
) -> Result<Json<Vec<CardSummary>>, ApiError> {
    auth.require_user()?;
    let pack_id = PackId::parse(&pack_id)?;

    let cards = state.cards.list_cards(pack_id).await?;
    Ok(Json(cards.into_iter().map(CardSummary::from).collect()))
}

pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path((pack_id, card_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    auth.require_user()?;
    let pack_id = PackId::parse(&pack_id)?;
    let card_id = CardId::parse(&card_id)?;

    let removed = state.cards.delete_card(pack_id, card_id).await?;
    tracing::info!(pack_id = %pack_id, card_id = %card_id, removed, "Card delete");
    Ok(StatusCode::NO_CONTENT)
}
