use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_GLOBAL_CATEGORY: &str = "productivity";
pub const DEFAULT_GLOBAL_DIFFICULTY: &str = "medium";

/// An admin-authored quest visible to every user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalQuest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub category: String,
    pub difficulty: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGlobalQuestInput {
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub category: String,
    pub difficulty: String,
    pub expires_at: Option<DateTime<Utc>>,
}
