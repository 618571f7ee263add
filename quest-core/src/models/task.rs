use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SKILL_TREE: &str = "Mind";
pub const DEFAULT_DIFFICULTY: f64 = 1.0;
pub const DEFAULT_ESTIMATED_MINUTES: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub skill_tree: String,
    pub difficulty: f64,
    pub estimated_minutes: f64,
    pub xp_reward: u64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A task ready to be stored. The reward is computed by the caller, once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
    pub skill_tree: String,
    pub difficulty: f64,
    pub estimated_minutes: f64,
    pub xp_reward: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub limit: u32,
    pub skip: u32,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            completed: None,
            limit: 200,
            skip: 0,
        }
    }
}
