use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use quest_core::models::{
    Admin, CreateAdminInput, CreateGlobalQuestInput, GlobalQuestStats, DEFAULT_GLOBAL_CATEGORY,
    DEFAULT_GLOBAL_DIFFICULTY,
};
use quest_core::leveling::{RewardError, MAX_XP};

use super::{blocking, required, AppState};
use crate::auth::cookies::{clear_cookie, session_cookie};
use crate::auth::{hash_password, verify_password, CurrentAdmin, PrincipalKind};
use crate::error::ApiError;

const GLOBAL_LIST_LIMIT: u32 = 500;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGlobalQuestRequest {
    title: Option<String>,
    description: Option<String>,
    #[serde(alias = "xpReward")]
    xp_reward: Option<u64>,
    category: Option<String>,
    difficulty: Option<String>,
    #[serde(alias = "expiresAt")]
    expires_at: Option<DateTime<Utc>>,
}

/// Create the configured super-admin the first time someone logs in as it.
async fn ensure_super_admin(state: &AppState, username: &str) -> Result<Option<Admin>, ApiError> {
    if let Some(admin) = state.db.get_admin_by_username(username)? {
        return Ok(Some(admin));
    }

    let Some(creds) = state.config.admin.as_ref().filter(|c| c.username == username) else {
        return Ok(None);
    };

    let password = creds.password.clone();
    let password_hash = blocking(move || Ok(hash_password(&password)?)).await?;
    let created = state.db.create_admin(CreateAdminInput {
        username: creds.username.clone(),
        password_hash,
        is_super_admin: true,
    })?;

    match created {
        Some(admin) => {
            info!(admin_id = %admin.id, "Created super-admin from configuration");
            Ok(Some(admin))
        }
        // Lost a race with a concurrent login; the row exists now.
        None => Ok(state.db.get_admin_by_username(username)?),
    }
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let (Some(username), Some(password)) =
        (required(req.username), req.password.filter(|p| !p.is_empty()))
    else {
        return Err(ApiError::BadRequest("Missing fields".into()));
    };

    let admin = ensure_super_admin(&state, &username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let hash = admin.password_hash.clone();
    if !blocking(move || Ok(verify_password(&password, &hash)?)).await? {
        warn!(%username, "Rejected admin login");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(admin.id, PrincipalKind::Admin)?;
    info!(admin_id = %admin.id, "Admin logged in");

    let cookie = session_cookie(PrincipalKind::Admin, &token, state.config.secure_cookies());
    Ok(([(header::SET_COOKIE, cookie)], Json(json!({ "success": true }))))
}

/// POST /api/admin/logout
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_cookie(PrincipalKind::Admin))],
        Json(json!({ "success": true })),
    )
}

/// GET /api/admin/quests/global
pub async fn list_global_quests(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let quests = state.db.list_global_quests(GLOBAL_LIST_LIMIT)?;
    Ok(Json(json!({ "quests": quests })))
}

/// POST /api/admin/quests/global
pub async fn create_global_quest(
    CurrentAdmin(admin_id): CurrentAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreateGlobalQuestRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let title = required(req.title).ok_or_else(|| ApiError::BadRequest("Missing title".into()))?;
    let xp_reward = req.xp_reward.unwrap_or_default();
    if xp_reward >= MAX_XP {
        return Err(RewardError::TooLarge.into());
    }

    let quest = state.db.create_global_quest(CreateGlobalQuestInput {
        title,
        description: req.description.unwrap_or_default(),
        xp_reward,
        category: required(req.category).unwrap_or_else(|| DEFAULT_GLOBAL_CATEGORY.to_string()),
        difficulty: required(req.difficulty)
            .unwrap_or_else(|| DEFAULT_GLOBAL_DIFFICULTY.to_string()),
        expires_at: req.expires_at,
    })?;

    info!(quest_id = %quest.id, %admin_id, "Created global quest");
    Ok(Json(json!({ "success": true, "quest": quest })))
}

/// GET /api/admin/quests/stats
pub async fn quest_stats(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<GlobalQuestStats>, ApiError> {
    Ok(Json(state.db.global_quest_stats()?))
}
