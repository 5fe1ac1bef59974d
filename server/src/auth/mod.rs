//! Cookie sessions and the per-request authentication context.
//!
//! A successful login stores a random token in the `login_sessions` table and
//! hands it to the client as the `session` cookie. Each request resolves that
//! cookie once into an [`AuthContext`], which handlers and the review engine
//! receive explicitly.

pub mod password;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cards::UserId;
use uuid::Uuid;

use crate::error::ApiError;
use crate::persistence::{now_timestamp, LoginSessionData, LoginSessionRepository};
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Who is making the current request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<UserId>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// The authenticated user, or `Unauthorized`.
    pub fn require_user(&self) -> Result<UserId, ApiError> {
        self.user_id.ok_or_else(ApiError::unauthorized)
    }
}

impl FromRequestParts<Arc<AppState>> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Ok(AuthContext::anonymous());
        };
        if token.is_empty() {
            return Ok(AuthContext::anonymous());
        }

        let user_id = state.logins.find_active(&token, now_timestamp()).await?;
        Ok(AuthContext { user_id })
    }
}

/// Cookie and expiry settings for login sessions.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl: Duration,
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            secure: false,
        }
    }
}

impl SessionSettings {
    /// Build a new login record for `user_id`, valid from now for `ttl`.
    ///
    /// `expires_at` is clamped to `i64::MAX` so it survives the SQLite
    /// `INTEGER` column.
    pub fn new_login(&self, user_id: UserId) -> LoginSessionData {
        let now = now_timestamp();
        LoginSessionData {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: now,
            expires_at: now.saturating_add(self.ttl.as_secs()).min(i64::MAX as u64),
        }
    }

    /// The `Set-Cookie` value that carries `token` to the client.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(
                i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX),
            ))
            .build()
    }

    /// A cookie that makes the client drop its session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }
}
