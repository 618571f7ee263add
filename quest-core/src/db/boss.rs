use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::models::*;

const BOSS_COLUMNS: &str =
    "id, user_id, challenge_text, difficulty, xp_reward, completed, challenge_date";

fn boss_from_row(row: &Row<'_>) -> rusqlite::Result<BossChallenge> {
    Ok(BossChallenge {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        challenge_text: row.get(2)?,
        difficulty: row.get(3)?,
        xp_reward: row.get(4)?,
        completed: row.get(5)?,
        date: row.get(6)?,
    })
}

impl Database {
    /// The user's boss challenge for `date`, rolled on first request.
    pub fn boss_challenge_for(&self, user_id: Uuid, date: NaiveDate) -> Result<BossChallenge> {
        let rolled = BossChallenge::roll(user_id, date);
        self.with_transaction(|tx| {
            // UNIQUE (user_id, challenge_date) keeps an existing roll.
            tx.execute(
                &format!("INSERT OR IGNORE INTO boss_challenges ({BOSS_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                params![
                    rolled.id.to_string(),
                    rolled.user_id.to_string(),
                    rolled.challenge_text,
                    rolled.difficulty,
                    rolled.xp_reward,
                    rolled.completed,
                    rolled.date,
                ],
            )?;
            Ok(tx.query_row(
                &format!("SELECT {BOSS_COLUMNS} FROM boss_challenges WHERE user_id = ?1 AND challenge_date = ?2"),
                params![user_id.to_string(), date],
                boss_from_row,
            )?)
        })
    }
}
