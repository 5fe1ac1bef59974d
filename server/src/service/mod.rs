//! HTTP surface of the server
//!
//! - types: request and response bodies
//! - endpoints: axum handlers grouped by resource
//!
//! Everything lives under `/api`. When a static directory is configured, all
//! other paths serve the web client, falling back to its `index.html`.

pub mod endpoints;
pub mod types;


use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;
use endpoints::{cards, packs, review, users};

/// Build the application router.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = Router::new().nest("/api", api_routes());

    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving static files from {}", dir.display());
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).fallback(index));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Accounts
        .route("/users", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route("/me", get(users::me))
        // Packs and cards
        .route("/packs", post(packs::create_pack).get(packs::list_packs))
        .route("/packs/{pack_id}", delete(packs::delete_pack))
        .route(
            "/packs/{pack_id}/cards",
            post(cards::create_card).get(cards::list_cards),
        )
        .route("/packs/{pack_id}/cards/{card_id}", delete(cards::delete_card))
        // Review
        .route("/packs/{pack_id}/repeat", get(review::repeat_pack))
        .route("/packs/{pack_id}/finish", post(review::finish_pack))
        .route("/stats", get(review::user_stats))
        .route("/user_stats", get(review::user_stats))
        .fallback(api_not_found)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origin_header_values(origins)))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Configured origins usable alongside credentials. `*` is dropped: browsers
/// refuse it for credentialed requests and tower-http rejects it in a list.
fn origin_header_values(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list explicit origins instead");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect()
}
