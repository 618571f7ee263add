use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::Database;
use crate::models::*;

impl Database {
    /// Current background and token balance; `None` for an unknown user.
    pub fn background_settings(&self, user_id: Uuid) -> Result<Option<BackgroundSettings>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT COALESCE(p.background, ?2), u.background_tokens
                     FROM users u LEFT JOIN user_preferences p ON p.user_id = u.id
                     WHERE u.id = ?1",
                    params![user_id.to_string(), DEFAULT_BACKGROUND],
                    |r| {
                        Ok(BackgroundSettings {
                            background: r.get(0)?,
                            tokens: r.get(1)?,
                        })
                    },
                )
                .optional()?)
        })
    }

    pub fn set_background(&self, user_id: Uuid, background: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO user_preferences (user_id, background, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (user_id) DO UPDATE SET
                    background = excluded.background,
                    updated_at = excluded.updated_at",
                params![user_id.to_string(), background, Utc::now()],
            )
            .context("saving background preference")?;
            Ok(())
        })
    }
}
