use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use quest_core::models::BossChallenge;
use quest_core::Completable;

use super::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;

/// GET /api/boss-challenge/today
pub async fn today(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<BossChallenge>, ApiError> {
    let challenge = state
        .db
        .boss_challenge_for(user_id, Utc::now().date_naive())?;
    Ok(Json(challenge))
}

/// POST /api/boss-challenge/{challenge_id}/complete
pub async fn complete(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(challenge_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = Uuid::parse_str(&challenge_id).map_err(|_| ApiError::NotFound("Challenge"))?;
    let outcome = state.db.complete(user_id, Completable::Boss { id })?;

    Ok(Json(json!({
        "success": true,
        "xp_gained": outcome.xp_gained,
        "level_up": outcome.level_up,
        "new_level": outcome.new_level,
    })))
}
