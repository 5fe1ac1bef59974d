//! Pack endpoints

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cards::{NewPack, PackId};

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::persistence::{PackRepository, PersistenceError};
use crate::service::types::{CreatePackRequest, CreatedPackResponse, PackResponse};
use crate::state::AppState;

pub async fn create_pack(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    payload: Result<Json<CreatePackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedPackResponse>), ApiError> {
    let user_id = auth.require_user()?;
    let Json(req) = payload?;
    let new_pack = NewPack::new(&req.name, req.category.as_deref())?;

    let pack = state.packs.create_pack(&new_pack).await.map_err(|e| match e {
        PersistenceError::UniqueViolation(_) => {
            ApiError::Conflict("pack with this name already exists".to_string())
        }
        other => other.into(),
    })?;

    if let Err(e) = state.review.record_pack_created(user_id).await {
        tracing::warn!(user_id = %user_id, pack_id = %pack.id, "Failed to count created pack: {}", e);
    }

    tracing::info!(user_id = %user_id, pack_id = %pack.id, name = %pack.name, "Pack created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedPackResponse {
            message: "pack successfully created".to_string(),
            id: pack.id,
            name: pack.name,
            category: pack.category,
        }),
    ))
}

pub async fn list_packs(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Json<Vec<PackResponse>>, ApiError> {
    auth.require_user()?;
    let packs = state.packs.list_packs().await?;
    Ok(Json(packs.into_iter().map(PackResponse::from).collect()))
}

/// Answers 204 whether or not the pack existed.
pub async fn delete_pack(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = auth.require_user()?;
    let pack_id = PackId::parse(&id)?;

    let removed = state.packs.delete_pack(pack_id).await?;
    tracing::info!(user_id = %user_id, pack_id = %pack_id, removed, "Pack delete");
    Ok(StatusCode::NO_CONTENT)
}
