// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User lookup and provisioning.

use chrono::Utc;
use pickup_core::{PickupError, User};
use rusqlite::{params, OptionalExtension, Row};

use crate::database::{map_tr_err, to_db_time, Database};

const USER_COLUMNS: &str = "id, email, password_hash";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
    })
}

/// Find a user by exact email.
pub async fn find_by_email(db: &Database, email: &str) -> Result<Option<User>, PickupError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email],
                user_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Find a user by id.
pub async fn find_by_id(db: &Database, id: i64) -> Result<Option<User>, PickupError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a user, or replace the password hash when the email already exists.
pub async fn upsert(db: &Database, email: &str, password_hash: &str) -> Result<User, PickupError> {
    let email = email.to_string();
    let password_hash = password_hash.to_string();
    let now = to_db_time(&Utc::now());
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(email) DO UPDATE SET password_hash = excluded.password_hash
                     RETURNING {USER_COLUMNS}"
                ),
                params![email, password_hash, now],
                user_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}
