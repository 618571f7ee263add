use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::models::*;

const TASK_COLUMNS: &str = "id, user_id, title, description, skill_tree, \
     difficulty, estimated_minutes, xp_reward, completed, created_at, completed_at";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        skill_tree: row.get(4)?,
        difficulty: row.get(5)?,
        estimated_minutes: row.get(6)?,
        xp_reward: row.get(7)?,
        completed: row.get(8)?,
        created_at: row.get(9)?,
        completed_at: row.get(10)?,
    })
}

impl Database {
    pub fn create_task(&self, user_id: Uuid, input: CreateTaskInput) -> Result<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            description: input.description,
            skill_tree: input.skill_tree,
            difficulty: input.difficulty,
            estimated_minutes: input.estimated_minutes,
            xp_reward: input.xp_reward,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        };

        self.with_connection(|conn| {
            conn.execute(
                &format!("INSERT INTO tasks ({TASK_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"),
                params![
                    task.id.to_string(),
                    task.user_id.to_string(),
                    task.title,
                    task.description,
                    task.skill_tree,
                    task.difficulty,
                    task.estimated_minutes,
                    task.xp_reward,
                    task.completed,
                    task.created_at,
                    task.completed_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(task)
    }

    /// Fetch a task owned by `user_id`. Tasks of other users are invisible.
    pub fn get_task(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
                    params![id.to_string(), user_id.to_string()],
                    task_from_row,
                )
                .optional()?)
        })
    }

    /// Newest first.
    pub fn list_tasks(&self, user_id: Uuid, filter: TaskFilter) -> Result<Vec<Task>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 WHERE user_id = ?1 AND (?2 IS NULL OR completed = ?2)
                 ORDER BY created_at DESC
                 LIMIT ?3 OFFSET ?4"
            ))?;
            let tasks = stmt
                .query_map(
                    params![user_id.to_string(), filter.completed, filter.limit, filter.skip],
                    task_from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    pub fn delete_task(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        self.with_connection(|conn| {
            let deleted = conn.execute(
                "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
                params![id.to_string(), user_id.to_string()],
            )?;
            Ok(deleted > 0)
        })
    }

    /// Count tasks across all users, optionally filtered by completion.
    pub fn count_tasks(&self, completed: Option<bool>) -> Result<u64> {
        self.with_connection(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM tasks WHERE (?1 IS NULL OR completed = ?1)",
                params![completed],
                |r| r.get(0),
            )?)
        })
    }
}
