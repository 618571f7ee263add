use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use quest_core::models::PublicStats;

use super::AppState;
use crate::error::ApiError;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/public/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<PublicStats>, ApiError> {
    Ok(Json(state.db.public_stats()?))
}
