use anyhow::Result;

use super::Database;
use crate::models::PublicStats;

impl Database {
    pub fn public_stats(&self) -> Result<PublicStats> {
        let total_users = self.count_users()?;
        let completed_tasks = self.count_tasks(Some(true))?;
        let all_tasks = self.count_tasks(None)?;
        Ok(PublicStats::new(total_users, completed_tasks, all_tasks))
    }
}
