//! Registration, login, logout and the current-user lookup.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use cards::{validate, NewUser};

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{AuthContext, SESSION_COOKIE};
use crate::error::ApiError;
use crate::persistence::{LoginSessionRepository, PersistenceError, UserRepository};
use crate::service::types::{CredentialsRequest, MeResponse, MessageResponse};
use crate::state::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = payload?;
    let username = validate::username(&req.username)?;
    validate::password(&req.password)?;

    let password_hash = hash_password_blocking(req.password)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let new_user = NewUser::new(username, password_hash)?;

    let user = state.users.create_user(&new_user).await.map_err(|e| match e {
        PersistenceError::UniqueViolation(_) => {
            ApiError::Conflict("user with this username already exists".to_string())
        }
        other => other.into(),
    })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("user successfully created")),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let Json(req) = payload?;
    let username = validate::required("username", &req.username)?;
    validate::password(&req.password)?;

    let invalid = || ApiError::Unauthorized("invalid credentials");

    let user = state
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password_blocking(req.password, user.password_hash.clone())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !verified {
        tracing::debug!(username = %user.username, "Rejected login");
        return Err(invalid());
    }

    let login = state.sessions.new_login(user.id);
    state.logins.create_login(&login).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    let jar = jar.add(state.sessions.session_cookie(login.token));
    Ok((jar, Json(MessageResponse::new("logged in"))))
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    if let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        if let Err(e) = state.logins.delete_login(&token).await {
            tracing::warn!("Failed to delete login session: {}", e);
        }
    }

    let jar = jar.remove(state.sessions.removal_cookie());
    (jar, StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Json<MeResponse>, ApiError> {
    let user_id = auth.require_user()?;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::Unauthorized("invalid session"))?;

    Ok(Json(MeResponse {
        username: user.username,
    }))
}
