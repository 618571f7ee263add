use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use quest_core::models::{FocusSession, StartFocusInput, DEFAULT_FOCUS_MINUTES, MAX_FOCUS_MINUTES};
use quest_core::Completable;

use super::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;

const HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Default, Deserialize)]
pub struct StartFocusRequest {
    duration_minutes: Option<u32>,
    task_id: Option<Uuid>,
}

fn planned_minutes(requested: Option<u32>) -> Result<u32, ApiError> {
    match requested.unwrap_or(DEFAULT_FOCUS_MINUTES) {
        0 => Err(ApiError::BadRequest("Focus sessions need at least one minute".into())),
        m if m > MAX_FOCUS_MINUTES => Err(ApiError::BadRequest(format!(
            "Focus sessions last at most {MAX_FOCUS_MINUTES} minutes"
        ))),
        m => Ok(m),
    }
}

/// POST /api/focus/start
pub async fn start(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<StartFocusRequest>, JsonRejection>,
) -> Result<Json<FocusSession>, ApiError> {
    let Json(req) = payload?;
    let session = state.db.start_focus(
        user_id,
        StartFocusInput {
            duration_minutes: planned_minutes(req.duration_minutes)?,
            task_id: req.task_id,
        },
    )?;
    Ok(Json(session))
}

/// POST /api/focus/{session_id}/complete
pub async fn complete(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = Uuid::parse_str(&session_id).map_err(|_| ApiError::NotFound("Session"))?;
    let outcome = state.db.complete(user_id, Completable::Focus { id })?;

    Ok(Json(json!({
        "success": true,
        "xp_gained": outcome.xp_gained,
        "level_up": outcome.level_up,
        "new_level": outcome.new_level,
    })))
}

/// GET /api/focus/history
pub async fn history(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FocusSession>>, ApiError> {
    Ok(Json(state.db.focus_history(user_id, HISTORY_LIMIT)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_length_is_bounded() {
        assert_eq!(planned_minutes(None).unwrap(), 25);
        assert_eq!(planned_minutes(Some(90)).unwrap(), 90);
        assert!(matches!(planned_minutes(Some(0)), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            planned_minutes(Some(MAX_FOCUS_MINUTES + 1)),
            Err(ApiError::BadRequest(_))
        ));
    }
}
