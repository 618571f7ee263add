use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{is_unique_violation, uuid_column, Database};
use crate::models::*;

const ADMIN_COLUMNS: &str = "id, username, password_hash, is_super_admin, created_at";

fn admin_from_row(row: &Row<'_>) -> rusqlite::Result<Admin> {
    Ok(Admin {
        id: uuid_column(row, 0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        is_super_admin: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl Database {
    /// Returns `None` when the username is taken.
    pub fn create_admin(&self, input: CreateAdminInput) -> Result<Option<Admin>> {
        let admin = Admin {
            id: Uuid::new_v4(),
            username: input.username,
            password_hash: input.password_hash,
            is_super_admin: input.is_super_admin,
            created_at: Utc::now(),
        };

        self.with_connection(|conn| {
            let inserted = conn.execute(
                &format!("INSERT INTO admins ({ADMIN_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                params![
                    admin.id.to_string(),
                    admin.username,
                    admin.password_hash,
                    admin.is_super_admin,
                    admin.created_at,
                ],
            );

            match inserted {
                Ok(_) => Ok(Some(admin)),
                Err(e) if is_unique_violation(&e) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_admin(&self, id: Uuid) -> Result<Option<Admin>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = ?1"),
                    [id.to_string()],
                    admin_from_row,
                )
                .optional()?)
        })
    }

    pub fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE username = ?1"),
                    [username],
                    admin_from_row,
                )
                .optional()?)
        })
    }
}
