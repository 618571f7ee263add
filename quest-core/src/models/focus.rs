use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const MAX_FOCUS_MINUTES: u32 = 24 * 60;
pub const FOCUS_XP_PER_MINUTE: u64 = 2;

/// A timed deep-work block. Completing it grants XP for the planned length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Option<Uuid>,
    pub duration_minutes: u32,
    pub xp_reward: u64,
    pub completed: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl FocusSession {
    pub fn reward_for(duration_minutes: u32) -> u64 {
        duration_minutes as u64 * FOCUS_XP_PER_MINUTE
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartFocusInput {
    pub duration_minutes: u32,
    pub task_id: Option<Uuid>,
}
