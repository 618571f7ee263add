//! HTTP API.
//!
//! Every route lives under `/api`. Handlers that need a principal take a
//! [`CurrentUser`](crate::auth::CurrentUser) or
//! [`CurrentAdmin`](crate::auth::CurrentAdmin) extractor as their first
//! argument so the session gate runs before any store access.

mod admin;
mod analytics;
mod auth;
mod background;
mod boss;
mod focus;
mod leaderboard;
mod modes;
mod public;
mod quests;
mod tasks;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use quest_core::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::TokenService;
use crate::config::Config;
use crate::error::ApiError;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            tokens: TokenService::new(&config.jwt_secret),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(public::health))
        .route("/public/stats", get(public::stats))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route("/tasks/{task_id}", delete(tasks::remove))
        .route("/tasks/{task_id}/complete", patch(tasks::complete))
        .route("/quests/{quest_type}", get(quests::list))
        .route("/quest-actions/{quest_id}/complete", post(quests::complete))
        .route("/leaderboard/{scope}", get(leaderboard::show))
        .route("/analytics/dashboard", get(analytics::dashboard))
        .route("/user/background", get(background::show))
        .route("/user/background/update", post(background::update))
        .route("/user/background/generate", post(background::generate))
        .route("/modes/{mode}/items", get(modes::list).post(modes::create))
        .route("/focus/start", post(focus::start))
        .route("/focus/history", get(focus::history))
        .route("/focus/{session_id}/complete", post(focus::complete))
        .route("/boss-challenge/today", get(boss::today))
        .route("/boss-challenge/{challenge_id}/complete", post(boss::complete))
        .route("/admin/login", post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route(
            "/admin/quests/global",
            get(admin::list_global_quests).post(admin::create_global_quest),
        )
        .route("/admin/quests/stats", get(admin::quest_stats));

    let mut router = Router::new()
        .nest("/api", api)
        .fallback(|| async { ApiError::NotFound("Route") })
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(state.config.cors_origin.as_deref()) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn cors_layer(origin: Option<&str>) -> Option<CorsLayer> {
    let origin = origin?;
    let origin = match HeaderValue::from_str(origin) {
        Ok(origin) => origin,
        Err(e) => {
            warn!(origin, error = %e, "Ignoring invalid CORS origin");
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

/// Run CPU-heavy work (password hashing) off the async executor.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
}

/// Trimmed, non-empty string field or `None`.
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
