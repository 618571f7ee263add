use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use quest_core::models::{DashboardAnalytics, DEFAULT_ANALYTICS_DAYS, MAX_ANALYTICS_DAYS};

use super::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    days: Option<u32>,
}

fn window_days(days: Option<u32>) -> u32 {
    match days {
        None | Some(0) => DEFAULT_ANALYTICS_DAYS,
        Some(n) => n.min(MAX_ANALYTICS_DAYS),
    }
}

/// GET /api/analytics/dashboard?days=
pub async fn dashboard(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<DashboardAnalytics>, ApiError> {
    let Query(query) = query?;
    let analytics = state
        .db
        .dashboard_analytics(user_id, window_days(query.days), Utc::now())?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(analytics))
}
