use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use quest_core::models::{GlobalQuest, QuestType};
use quest_core::Completable;

use super::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;

const GLOBAL_SCOPE: &str = "global";
const GLOBAL_LIST_LIMIT: u32 = 200;

/// A global quest shown alongside personal quests. Global quests carry no
/// per-user progress, so they always read as open at 0 of 1.
#[derive(Debug, Serialize)]
struct GlobalQuestView {
    id: Uuid,
    #[serde(rename = "type")]
    quest_type: &'static str,
    title: String,
    description: String,
    xp_reward: u64,
    category: String,
    difficulty: String,
    completed: bool,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    progress: u32,
    target: u32,
}

impl From<GlobalQuest> for GlobalQuestView {
    fn from(q: GlobalQuest) -> Self {
        Self {
            id: q.id,
            quest_type: GLOBAL_SCOPE,
            title: q.title,
            description: q.description,
            xp_reward: q.xp_reward,
            category: q.category,
            difficulty: q.difficulty,
            completed: false,
            created_at: q.created_at,
            expires_at: q.expires_at,
            progress: 0,
            target: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteQuery {
    quest_type: Option<String>,
}

/// GET /api/quests/{quest_type}
pub async fn list(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(quest_type): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let quests = if quest_type == GLOBAL_SCOPE {
        let global: Vec<GlobalQuestView> = state
            .db
            .list_global_quests(GLOBAL_LIST_LIMIT)?
            .into_iter()
            .map(GlobalQuestView::from)
            .collect();
        serde_json::to_value(global).map_err(anyhow::Error::from)?
    } else {
        match QuestType::from_str(&quest_type) {
            Some(kind) => {
                serde_json::to_value(state.db.ensure_quests(user_id, kind)?)
                    .map_err(anyhow::Error::from)?
            }
            None => json!([]),
        }
    };

    Ok(Json(json!({ "quests": quests, "extra_quests": 0 })))
}

/// POST /api/quest-actions/{quest_id}/complete?quest_type=
///
/// `quest_type` defaults to `daily`. Unknown types and malformed ids can't
/// match a stored quest and answer 404.
pub async fn complete(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(quest_id): Path<String>,
    query: Result<Query<CompleteQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let quest_type = query
        .quest_type
        .as_deref()
        .map_or(Some(QuestType::Daily), QuestType::from_str)
        .ok_or(ApiError::NotFound("Quest"))?;
    let id = Uuid::parse_str(&quest_id).map_err(|_| ApiError::NotFound("Quest"))?;

    let outcome = state
        .db
        .complete(user_id, Completable::Quest { id, quest_type })?;

    Ok(Json(json!({
        "success": true,
        "xp_gained": outcome.xp_gained,
        "level_up": outcome.level_up,
        "new_level": outcome.new_level,
    })))
}
