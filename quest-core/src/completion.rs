//! Completing tasks, quests, focus sessions and boss challenges.
//!
//! A completable flips from pending to completed exactly once. The flip is a
//! conditional update (`... AND completed = 0`) executed in the same
//! transaction as the XP grant, so concurrent requests for one entity can
//! never both see it pending and both collect the reward.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::db::{find_user, Database};
use crate::leveling::{add_xp, advance_streak, level_from_total_xp};
use crate::models::QuestType;

/// Something a user can complete for XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completable {
    Task { id: Uuid },
    Quest { id: Uuid, quest_type: QuestType },
    Focus { id: Uuid },
    Boss { id: Uuid },
}

impl Completable {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Task { .. } => "task",
            Self::Quest { .. } => "quest",
            Self::Focus { .. } => "focus session",
            Self::Boss { .. } => "boss challenge",
        }
    }

    fn id(&self) -> Uuid {
        match self {
            Self::Task { id } | Self::Quest { id, .. } | Self::Focus { id } | Self::Boss { id } => *id,
        }
    }

    fn table(&self) -> &'static str {
        match self {
            Self::Task { .. } => "tasks",
            Self::Quest { .. } => "quests",
            Self::Focus { .. } => "focus_sessions",
            Self::Boss { .. } => "boss_challenges",
        }
    }

    /// Added to the user's discipline score on first completion.
    pub fn discipline_bonus(&self) -> u32 {
        match self {
            Self::Task { .. } => 1,
            Self::Quest { .. } => 0,
            Self::Focus { .. } => 2,
            Self::Boss { .. } => 5,
        }
    }

    /// Flip `completed` for the owner's row if it is still pending.
    fn mark_completed(&self, conn: &Connection, user_id: Uuid) -> rusqlite::Result<bool> {
        let id = self.id().to_string();
        let user_id = user_id.to_string();
        let changed = match self {
            Self::Task { .. } | Self::Focus { .. } => conn.execute(
                &format!(
                    "UPDATE {} SET completed = 1, completed_at = ?1
                     WHERE id = ?2 AND user_id = ?3 AND completed = 0",
                    self.table()
                ),
                params![Utc::now(), id, user_id],
            )?,
            Self::Quest { quest_type, .. } => conn.execute(
                "UPDATE quests SET completed = 1, progress = target
                 WHERE id = ?1 AND user_id = ?2 AND quest_type = ?3 AND completed = 0",
                params![id, user_id, quest_type.as_str()],
            )?,
            Self::Boss { .. } => conn.execute(
                "UPDATE boss_challenges SET completed = 1
                 WHERE id = ?1 AND user_id = ?2 AND completed = 0",
                params![id, user_id],
            )?,
        };
        Ok(changed == 1)
    }

    /// The fixed reward of the owner's row, or `None` if no such row exists.
    fn xp_reward(&self, conn: &Connection, user_id: Uuid) -> rusqlite::Result<Option<u64>> {
        use rusqlite::OptionalExtension;

        let id = self.id().to_string();
        let user_id = user_id.to_string();
        match self {
            Self::Quest { quest_type, .. } => conn
                .query_row(
                    "SELECT xp_reward FROM quests WHERE id = ?1 AND user_id = ?2 AND quest_type = ?3",
                    params![id, user_id, quest_type.as_str()],
                    |r| r.get(0),
                )
                .optional(),
            _ => conn
                .query_row(
                    &format!("SELECT xp_reward FROM {} WHERE id = ?1 AND user_id = ?2", self.table()),
                    params![id, user_id],
                    |r| r.get(0),
                )
                .optional(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub xp_gained: u64,
    pub level_up: bool,
    pub new_level: u32,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl Database {
    /// Complete `target` on behalf of `user_id` and grant its XP.
    ///
    /// Repeat calls for an already completed entity succeed with zero XP and
    /// report the user's current level. Entities owned by someone else are
    /// reported as not found.
    pub fn complete(
        &self,
        user_id: Uuid,
        target: Completable,
    ) -> Result<CompletionOutcome, CompletionError> {
        let outcome = self.with_transaction(|tx| {
            let Some(user) = find_user(tx, user_id)? else {
                return Ok(None);
            };
            let Some(xp_reward) = target.xp_reward(tx, user_id)? else {
                return Ok(None);
            };

            if !target.mark_completed(tx, user_id)? {
                return Ok(Some(CompletionOutcome {
                    xp_gained: 0,
                    level_up: false,
                    new_level: user.level,
                }));
            }

            let now = Utc::now();
            let new_total = add_xp(user.total_xp, xp_reward);
            let new_level = level_from_total_xp(new_total);
            let today = now.date_naive();
            let streak = advance_streak(user.last_completion_on, today, user.current_streak);

            tx.execute(
                "UPDATE users SET
                    total_xp = ?1,
                    level = ?2,
                    current_streak = ?3,
                    longest_streak = MAX(longest_streak, ?3),
                    last_completion_on = ?4,
                    last_active = ?5,
                    discipline_score = discipline_score + ?6
                 WHERE id = ?7",
                params![
                    new_total,
                    new_level,
                    streak,
                    today,
                    now,
                    target.discipline_bonus(),
                    user_id.to_string()
                ],
            )?;

            Ok(Some(CompletionOutcome {
                xp_gained: xp_reward,
                level_up: new_level > user.level,
                new_level,
            }))
        })?;

        let outcome = outcome.ok_or(CompletionError::NotFound(target.kind()))?;
        info!(
            user_id = %user_id,
            kind = target.kind(),
            id = %target.id(),
            xp_gained = outcome.xp_gained,
            new_level = outcome.new_level,
            level_up = outcome.level_up,
            "Completion processed"
        );
        Ok(outcome)
    }
}
