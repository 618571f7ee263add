use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BOSS_XP_PER_DIFFICULTY: u64 = 50;

const BOSS_CHALLENGES: &[&str] = &[
    "Complete 5 tasks without distraction",
    "Work for 2 hours straight in Focus Mode",
    "Finish your most difficult task today",
    "Complete all pending tasks from yesterday",
    "Learn something new and create a task about it",
    "Help someone else with their task",
    "Wake up early and complete 3 tasks before noon",
    "No social media until you complete 3 tasks",
    "Complete a task you've been procrastinating on",
    "Double your daily task completion rate",
];

/// One challenge per user per day, worth 150 to 250 XP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossChallenge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub challenge_text: String,
    pub difficulty: u32,
    pub xp_reward: u64,
    pub completed: bool,
    pub date: NaiveDate,
}

impl BossChallenge {
    /// Roll the challenge for `user_id` on `date`.
    ///
    /// The roll is a pure function of its inputs, so two users rarely share a
    /// boss and one user sees the same boss all day.
    pub fn roll(user_id: Uuid, date: NaiveDate) -> Self {
        let bits = user_id.as_u128();
        let seed = ((bits >> 64) as u64 ^ bits as u64).wrapping_add(date.num_days_from_ce() as u64);
        let len = BOSS_CHALLENGES.len() as u64;
        let text = BOSS_CHALLENGES[(seed % len) as usize];
        let difficulty = 3 + ((seed / len) % 3) as u32;

        Self {
            id: Uuid::new_v4(),
            user_id,
            challenge_text: text.to_string(),
            difficulty,
            xp_reward: difficulty as u64 * BOSS_XP_PER_DIFFICULTY,
            completed: false,
            date,
        }
    }
}
