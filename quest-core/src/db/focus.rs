use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{optional_uuid_column, uuid_column, Database};
use crate::models::*;

const FOCUS_COLUMNS: &str =
    "id, user_id, task_id, duration_minutes, xp_reward, completed, started_at, completed_at";

fn focus_from_row(row: &Row<'_>) -> rusqlite::Result<FocusSession> {
    Ok(FocusSession {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        task_id: optional_uuid_column(row, 2)?,
        duration_minutes: row.get(3)?,
        xp_reward: row.get(4)?,
        completed: row.get(5)?,
        started_at: row.get(6)?,
        completed_at: row.get(7)?,
    })
}

impl Database {
    /// Start a focus session. Its reward is fixed now from the planned length.
    pub fn start_focus(&self, user_id: Uuid, input: StartFocusInput) -> Result<FocusSession> {
        let session = FocusSession {
            id: Uuid::new_v4(),
            user_id,
            task_id: input.task_id,
            duration_minutes: input.duration_minutes,
            xp_reward: FocusSession::reward_for(input.duration_minutes),
            completed: false,
            started_at: Utc::now(),
            completed_at: None,
        };

        self.with_connection(|conn| {
            conn.execute(
                &format!("INSERT INTO focus_sessions ({FOCUS_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                params![
                    session.id.to_string(),
                    session.user_id.to_string(),
                    session.task_id.map(|id| id.to_string()),
                    session.duration_minutes,
                    session.xp_reward,
                    session.completed,
                    session.started_at,
                    session.completed_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(session)
    }

    pub fn get_focus(&self, id: Uuid, user_id: Uuid) -> Result<Option<FocusSession>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {FOCUS_COLUMNS} FROM focus_sessions WHERE id = ?1 AND user_id = ?2"),
                    params![id.to_string(), user_id.to_string()],
                    focus_from_row,
                )
                .optional()?)
        })
    }

    /// Most recent sessions first.
    pub fn focus_history(&self, user_id: Uuid, limit: u32) -> Result<Vec<FocusSession>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FOCUS_COLUMNS} FROM focus_sessions
                 WHERE user_id = ?1
                 ORDER BY started_at DESC, rowid DESC
                 LIMIT ?2"
            ))?;
            let sessions = stmt
                .query_map(params![user_id.to_string(), limit], focus_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(sessions)
        })
    }
}
