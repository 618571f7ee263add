use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::models::*;

const GLOBAL_QUEST_COLUMNS: &str =
    "id, title, description, xp_reward, category, difficulty, expires_at, created_at";

fn global_quest_from_row(row: &Row<'_>) -> rusqlite::Result<GlobalQuest> {
    Ok(GlobalQuest {
        id: uuid_column(row, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        xp_reward: row.get(3)?,
        category: row.get(4)?,
        difficulty: row.get(5)?,
        expires_at: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl Database {
    pub fn create_global_quest(&self, input: CreateGlobalQuestInput) -> Result<GlobalQuest> {
        let quest = GlobalQuest {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            xp_reward: input.xp_reward,
            category: input.category,
            difficulty: input.difficulty,
            expires_at: input.expires_at,
            created_at: Utc::now(),
        };

        self.with_connection(|conn| {
            conn.execute(
                &format!("INSERT INTO global_quests ({GLOBAL_QUEST_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                params![
                    quest.id.to_string(),
                    quest.title,
                    quest.description,
                    quest.xp_reward,
                    quest.category,
                    quest.difficulty,
                    quest.expires_at,
                    quest.created_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(quest)
    }

    /// Newest first.
    pub fn list_global_quests(&self, limit: u32) -> Result<Vec<GlobalQuest>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {GLOBAL_QUEST_COLUMNS} FROM global_quests
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1"
            ))?;
            let quests = stmt
                .query_map([limit], global_quest_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(quests)
        })
    }

    pub fn global_quest_stats(&self) -> Result<GlobalQuestStats> {
        let now = Utc::now();
        self.with_connection(|conn| {
            let total_global_quests: u64 =
                conn.query_row("SELECT COUNT(*) FROM global_quests", [], |r| r.get(0))?;
            let expired_quests: u64 = conn.query_row(
                "SELECT COUNT(*) FROM global_quests WHERE expires_at IS NOT NULL AND expires_at <= ?1",
                [now],
                |r| r.get(0),
            )?;
            let total_users: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;

            Ok(GlobalQuestStats {
                total_global_quests,
                active_quests: total_global_quests - expired_quests,
                expired_quests,
                total_users,
            })
        })
    }
}
