use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::models::*;

const QUEST_COLUMNS: &str = "id, user_id, quest_type, title, description, xp_reward, \
     category, difficulty, completed, created_at, expires_at, progress, target";

fn quest_from_row(row: &Row<'_>) -> rusqlite::Result<Quest> {
    let raw_type: String = row.get(2)?;
    let quest_type = QuestType::from_str(&raw_type).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown quest type: {raw_type}").into(),
        )
    })?;

    Ok(Quest {
        id: uuid_column(row, 0)?,
        user_id: uuid_column(row, 1)?,
        quest_type,
        title: row.get(3)?,
        description: row.get(4)?,
        xp_reward: row.get(5)?,
        category: row.get(6)?,
        difficulty: row.get(7)?,
        completed: row.get(8)?,
        created_at: row.get(9)?,
        expires_at: row.get(10)?,
        progress: row.get(11)?,
        target: row.get(12)?,
    })
}

fn select_quests(
    conn: &Connection,
    user_id: Uuid,
    quest_type: QuestType,
) -> rusqlite::Result<Vec<Quest>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {QUEST_COLUMNS} FROM quests
         WHERE user_id = ?1 AND quest_type = ?2
         ORDER BY created_at ASC, rowid ASC"
    ))?;
    let quests = stmt
        .query_map(
            params![user_id.to_string(), quest_type.as_str()],
            quest_from_row,
        )?
        .collect();
    quests
}

fn insert_quest(conn: &Connection, quest: &Quest) -> rusqlite::Result<()> {
    conn.execute(
        &format!("INSERT INTO quests ({QUEST_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"),
        params![
            quest.id.to_string(),
            quest.user_id.to_string(),
            quest.quest_type.as_str(),
            quest.title,
            quest.description,
            quest.xp_reward,
            quest.category,
            quest.difficulty,
            quest.completed,
            quest.created_at,
            quest.expires_at,
            quest.progress,
            quest.target,
        ],
    )?;
    Ok(())
}

impl Database {
    pub fn list_quests(&self, user_id: Uuid, quest_type: QuestType) -> Result<Vec<Quest>> {
        self.with_connection(|conn| Ok(select_quests(conn, user_id, quest_type)?))
    }

    /// Return the user's quests of `quest_type`, seeding them from the
    /// templates on first access.
    pub fn ensure_quests(&self, user_id: Uuid, quest_type: QuestType) -> Result<Vec<Quest>> {
        self.with_transaction(|tx| {
            let existing = select_quests(tx, user_id, quest_type)?;
            if !existing.is_empty() {
                return Ok(existing);
            }

            let now = Utc::now();
            let seeded: Vec<Quest> = quest_type
                .templates()
                .iter()
                .map(|t| Quest::from_template(user_id, quest_type, t, now))
                .collect();
            for quest in &seeded {
                insert_quest(tx, quest)
                    .with_context(|| format!("seeding {} quest", quest_type.as_str()))?;
            }

            tracing::debug!(
                user_id = %user_id,
                quest_type = quest_type.as_str(),
                count = seeded.len(),
                "Seeded quests"
            );
            Ok(seeded)
        })
    }

    pub fn get_quest(
        &self,
        id: Uuid,
        user_id: Uuid,
        quest_type: QuestType,
    ) -> Result<Option<Quest>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    &format!(
                        "SELECT {QUEST_COLUMNS} FROM quests
                         WHERE id = ?1 AND user_id = ?2 AND quest_type = ?3"
                    ),
                    params![id.to_string(), user_id.to_string(), quest_type.as_str()],
                    quest_from_row,
                )
                .optional()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Database, User) {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let user = db
            .create_user(CreateUserInput {
                email: "q@example.com".into(),
                username: "quester".into(),
                password_hash: "hash".into(),
            })
            .unwrap()
            .unwrap();
        (db, user)
    }

    #[test]
    fn ensure_quests_seeds_once() {
        let (db, user) = setup();

        let first = db.ensure_quests(user.id, QuestType::Daily).unwrap();
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|q| !q.completed && q.target == 1));

        let second = db.ensure_quests(user.id, QuestType::Daily).unwrap();
        let first_ids: Vec<_> = first.iter().map(|q| q.id).collect();
        let second_ids: Vec<_> = second.iter().map(|q| q.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn quests_are_keyed_by_type() {
        let (db, user) = setup();
        let daily = db.ensure_quests(user.id, QuestType::Daily).unwrap();

        let id = daily[0].id;
        assert!(db.get_quest(id, user.id, QuestType::Daily).unwrap().is_some());
        assert!(db.get_quest(id, user.id, QuestType::Weekly).unwrap().is_none());
        assert!(db.list_quests(user.id, QuestType::Weekly).unwrap().is_empty());
    }
}
