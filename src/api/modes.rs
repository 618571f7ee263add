use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use quest_core::models::CreateModeItemInput;

use super::{required, AppState};
use crate::auth::CurrentUser;
use crate::error::ApiError;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 200;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    title: Option<String>,
    content: Option<String>,
}

/// GET /api/modes/{mode}/items
pub async fn list(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(mode): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let limit = match query.limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(n) => n.min(MAX_LIMIT),
    };
    let items = state.db.list_mode_items(user_id, &mode, limit)?;
    Ok(Json(json!({ "items": items })))
}

/// POST /api/modes/{mode}/items
pub async fn create(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(mode): Path<String>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let title = required(req.title).ok_or_else(|| ApiError::BadRequest("Missing title".into()))?;

    let item = state.db.create_mode_item(
        user_id,
        CreateModeItemInput {
            mode,
            title,
            content: required(req.content).unwrap_or_default(),
        },
    )?;
    Ok(Json(json!({ "success": true, "item": item })))
}
