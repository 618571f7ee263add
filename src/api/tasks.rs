use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use quest_core::leveling::{active_streak, compute_task_reward};
use quest_core::models::{
    CreateTaskInput, TaskFilter, DEFAULT_DIFFICULTY, DEFAULT_ESTIMATED_MINUTES, DEFAULT_SKILL_TREE,
};
use quest_core::Completable;

use super::{required, AppState};
use crate::auth::CurrentUser;
use crate::error::ApiError;

const DEFAULT_LIMIT: u32 = 200;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    completed: Option<bool>,
    limit: Option<u32>,
    skip: Option<u32>,
}

impl ListQuery {
    fn into_filter(self) -> TaskFilter {
        let limit = match self.limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(n) => n.min(MAX_LIMIT),
        };
        TaskFilter {
            completed: self.completed,
            limit,
            skip: self.skip.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    #[serde(alias = "skillTree")]
    skill_tree: Option<String>,
    difficulty: Option<f64>,
    #[serde(alias = "estimatedMinutes")]
    estimated_minutes: Option<f64>,
}

/// Task ids arrive as raw path segments; anything that isn't a UUID
/// cannot name a stored task.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Task"))
}

/// GET /api/tasks
pub async fn list(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let tasks = state.db.list_tasks(user_id, query.into_filter())?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// POST /api/tasks
///
/// The reward is priced once here, against the streak the user holds today.
pub async fn create(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let title = required(req.title).ok_or_else(|| ApiError::BadRequest("Title is required".into()))?;

    let user = state.db.get_user(user_id)?.ok_or(ApiError::Unauthorized)?;
    let streak = active_streak(
        user.last_completion_on,
        Utc::now().date_naive(),
        user.current_streak,
    );

    let difficulty = req.difficulty.unwrap_or(DEFAULT_DIFFICULTY);
    let estimated_minutes = req.estimated_minutes.unwrap_or(DEFAULT_ESTIMATED_MINUTES);
    let xp_reward = compute_task_reward(difficulty, estimated_minutes, streak)?;

    let task = state.db.create_task(
        user_id,
        CreateTaskInput {
            title,
            description: req.description.unwrap_or_default(),
            skill_tree: required(req.skill_tree).unwrap_or_else(|| DEFAULT_SKILL_TREE.to_string()),
            difficulty,
            estimated_minutes,
            xp_reward,
        },
    )?;

    info!(task_id = %task.id, %user_id, xp_reward, "Created task");
    Ok(Json(json!({ "success": true, "task": task })))
}

/// DELETE /api/tasks/{task_id}
pub async fn remove(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let task_id = parse_task_id(&task_id)?;
    if !state.db.delete_task(task_id, user_id)? {
        return Err(ApiError::NotFound("Task"));
    }
    Ok(Json(json!({ "success": true })))
}

/// PATCH /api/tasks/{task_id}/complete
pub async fn complete(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(&task_id)?;
    let outcome = state.db.complete(user_id, Completable::Task { id })?;

    Ok(Json(json!({
        "success": true,
        "xp_gained": outcome.xp_gained,
        "level_up": outcome.level_up,
        "new_level": outcome.new_level,
    })))
}
