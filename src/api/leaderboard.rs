use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use quest_core::models::{Leaderboard, LeaderboardScope};

use super::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 200;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    limit: Option<u32>,
}

fn effective_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(n) => n.min(MAX_LIMIT),
    }
}

/// GET /api/leaderboard/{scope}
///
/// Any scope other than `local` ranks everyone.
pub async fn show(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(scope): Path<String>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Leaderboard>, ApiError> {
    let Query(query) = query?;
    let scope = LeaderboardScope::from_str(&scope).unwrap_or(LeaderboardScope::Global);

    // A valid token for a deleted account is no session at all.
    let viewer = state.db.get_user(user_id)?.ok_or(ApiError::Unauthorized)?;
    let board = state
        .db
        .leaderboard(scope, &viewer, effective_limit(query.limit))?;

    Ok(Json(board))
}
