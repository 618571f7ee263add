use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicStats {
    pub total_users: u64,
    pub completed_tasks: u64,
    pub success_rate: u64,
}

impl PublicStats {
    /// Shown before anyone has created a task.
    pub const DEFAULT_SUCCESS_RATE: u64 = 95;

    pub fn new(total_users: u64, completed_tasks: u64, all_tasks: u64) -> Self {
        let success_rate = if all_tasks == 0 {
            Self::DEFAULT_SUCCESS_RATE
        } else {
            ((completed_tasks as f64 / all_tasks as f64) * 100.0).round() as u64
        };

        Self {
            total_users,
            completed_tasks,
            success_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalQuestStats {
    pub total_global_quests: u64,
    pub active_quests: u64,
    pub expired_quests: u64,
    pub total_users: u64,
}
