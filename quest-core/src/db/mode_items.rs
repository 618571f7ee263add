use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::models::*;

const MODE_ITEM_COLUMNS: &str = "id, user_id, mode, title, content, created_at";

fn mode_item_from_row(row: &Row<'_>) -> rusqlite::Result<ModeItem> {
    Ok(ModeItem {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        mode: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl Database {
    pub fn create_mode_item(&self, user_id: Uuid, input: CreateModeItemInput) -> Result<ModeItem> {
        let item = ModeItem {
            id: Uuid::new_v4(),
            user_id,
            mode: input.mode,
            title: input.title,
            content: input.content,
            created_at: Utc::now(),
        };

        self.with_connection(|conn| {
            conn.execute(
                &format!("INSERT INTO mode_items ({MODE_ITEM_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                params![
                    item.id.to_string(),
                    item.user_id.to_string(),
                    item.mode,
                    item.title,
                    item.content,
                    item.created_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(item)
    }

    /// The user's items in `mode`, newest first.
    pub fn list_mode_items(&self, user_id: Uuid, mode: &str, limit: u32) -> Result<Vec<ModeItem>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MODE_ITEM_COLUMNS} FROM mode_items
                 WHERE user_id = ?1 AND mode = ?2
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?3"
            ))?;
            let items = stmt
                .query_map(params![user_id.to_string(), mode, limit], mode_item_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
    }
}
