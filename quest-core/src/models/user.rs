use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_DISCIPLINE_SCORE: u32 = 50;
pub const DEFAULT_BACKGROUND_TOKENS: u32 = 10;
pub const DEFAULT_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub level: u32,
    pub total_xp: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub discipline_score: u32,
    pub background_tokens: u32,
    pub country: String,
    pub last_completion_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardScope {
    Global,
    Local,
}

impl LeaderboardScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "global" => Some(Self::Global),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub level: u32,
    pub total_xp: u64,
    pub current_streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub current_user_rank: u64,
    pub total_users: u64,
    pub country: String,
}
