use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-form note filed under one of the dashboard's modes (journal, ideas, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mode: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModeItemInput {
    pub mode: String,
    pub title: String,
    pub content: String,
}
