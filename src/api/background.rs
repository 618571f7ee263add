use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use quest_core::models::{background_options, BackgroundSettings, DEFAULT_BACKGROUND};

use super::{required, AppState};
use crate::auth::CurrentUser;
use crate::error::ApiError;

const MAX_BACKGROUND_LEN: usize = 256;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBackgroundRequest {
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateBackgroundRequest {
    prompt: Option<String>,
}

/// GET /api/user/background
pub async fn show(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<BackgroundSettings>, ApiError> {
    let settings = state
        .db
        .background_settings(user_id)?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(settings))
}

/// POST /api/user/background/update
pub async fn update(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdateBackgroundRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let background = required(req.background).unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
    if background.len() > MAX_BACKGROUND_LEN {
        return Err(ApiError::BadRequest("Background is too long".into()));
    }

    state.db.set_background(user_id, &background)?;
    Ok(Json(json!({ "success": true, "background": background })))
}

/// POST /api/user/background/generate
pub async fn generate(
    CurrentUser(_): CurrentUser,
    payload: Result<Json<GenerateBackgroundRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let options = background_options(req.prompt.as_deref().unwrap_or_default());
    Ok(Json(json!({ "success": true, "options": options })))
}
