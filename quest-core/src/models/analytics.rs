use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ANALYTICS_DAYS: u32 = 30;
pub const MAX_ANALYTICS_DAYS: u32 = 365;
/// Days covered by `weekly_data`, ending today.
pub const WEEK_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub tasks: u64,
    pub focus_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    /// Tasks completed within the window.
    pub total_tasks: u64,
    pub pending_tasks: u64,
    /// Minutes of completed focus sessions started within the window.
    pub total_focus_time: u64,
    pub current_level: u32,
    pub current_xp: u64,
    pub next_level_xp: u64,
    pub discipline_score: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub skill_breakdown: BTreeMap<String, u64>,
    pub weekly_data: Vec<DayActivity>,
    pub window_days: u32,
}
