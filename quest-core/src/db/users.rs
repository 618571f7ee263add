use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{is_unique_violation, uuid_column, Database};
use crate::models::*;

const USER_COLUMNS: &str = "id, email, username, password_hash, level, total_xp, \
     current_streak, longest_streak, discipline_score, background_tokens, country, \
     last_completion_on, created_at, last_active";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_column(row, 0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        password_hash: row.get(3)?,
        level: row.get(4)?,
        total_xp: row.get(5)?,
        current_streak: row.get(6)?,
        longest_streak: row.get(7)?,
        discipline_score: row.get(8)?,
        background_tokens: row.get(9)?,
        country: row.get(10)?,
        last_completion_on: row.get(11)?,
        created_at: row.get(12)?,
        last_active: row.get(13)?,
    })
}

pub(crate) fn find_user(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id.to_string()],
        user_from_row,
    )
    .optional()
}

impl Database {
    /// Insert a new user at level 1 with no XP.
    ///
    /// Returns `None` when the email is already registered.
    pub fn create_user(&self, input: CreateUserInput) -> Result<Option<User>> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            username: input.username,
            password_hash: input.password_hash,
            level: 1,
            total_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            discipline_score: DEFAULT_DISCIPLINE_SCORE,
            background_tokens: DEFAULT_BACKGROUND_TOKENS,
            country: DEFAULT_COUNTRY.to_string(),
            last_completion_on: None,
            created_at: now,
            last_active: now,
        };

        self.with_connection(|conn| {
            let inserted = conn.execute(
                &format!("INSERT INTO users ({USER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"),
                params![
                    user.id.to_string(),
                    user.email,
                    user.username,
                    user.password_hash,
                    user.level,
                    user.total_xp,
                    user.current_streak,
                    user.longest_streak,
                    user.discipline_score,
                    user.background_tokens,
                    user.country,
                    user.last_completion_on,
                    user.created_at,
                    user.last_active,
                ],
            );

            match inserted {
                Ok(_) => Ok(Some(user)),
                Err(e) if is_unique_violation(&e) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.with_connection(|conn| Ok(find_user(conn, id)?))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                    [email],
                    user_from_row,
                )
                .optional()?)
        })
    }

    /// Record activity (login) for a user. Returns false if the user is gone.
    pub fn touch_user(&self, id: Uuid) -> Result<bool> {
        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE users SET last_active = ?1 WHERE id = ?2",
                params![Utc::now(), id.to_string()],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn count_users(&self) -> Result<u64> {
        self.with_connection(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?)
        })
    }

    /// Rank users by total XP, optionally restricted to `viewer`'s country.
    pub fn leaderboard(
        &self,
        scope: LeaderboardScope,
        viewer: &User,
        limit: u32,
    ) -> Result<Leaderboard> {
        let country = match scope {
            LeaderboardScope::Global => None,
            LeaderboardScope::Local => Some(viewer.country.as_str()),
        };

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT username, level, total_xp, current_streak FROM users
                 WHERE (?1 IS NULL OR country = ?1)
                 ORDER BY total_xp DESC, created_at ASC
                 LIMIT ?2",
            )?;
            let leaderboard = stmt
                .query_map(params![country, limit], |row| {
                    Ok(LeaderboardEntry {
                        username: row.get(0)?,
                        level: row.get(1)?,
                        total_xp: row.get(2)?,
                        current_streak: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let total_users: u64 = conn.query_row(
                "SELECT COUNT(*) FROM users WHERE (?1 IS NULL OR country = ?1)",
                params![country],
                |r| r.get(0),
            )?;
            let higher: u64 = conn.query_row(
                "SELECT COUNT(*) FROM users WHERE (?1 IS NULL OR country = ?1) AND total_xp > ?2",
                params![country, viewer.total_xp],
                |r| r.get(0),
            )?;

            Ok(Leaderboard {
                leaderboard,
                current_user_rank: higher + 1,
                total_users,
                country: viewer.country.clone(),
            })
        })
    }
}
