// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner-scoped order CRUD operations.

use std::str::FromStr;

use chrono::Utc;
use pickup_core::{Order, OrderDraft, PickupError, Preference};
use rusqlite::{params, OptionalExtension, Row};

use crate::database::{from_db_time, map_tr_err, to_db_time, Database};

const ORDER_COLUMNS: &str = "id, user_id, preference, address, pickup_time, created_at";

fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    let preference: String = row.get(2)?;
    let pickup_time: Option<String> = row.get(4)?;
    let created_at: String = row.get(5)?;
    Ok(Order {
        id: row.get(0)?,
        user_id: row.get(1)?,
        preference: Preference::from_str(&preference).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        address: row.get(3)?,
        pickup_time: pickup_time.as_deref().map(|t| from_db_time(t, 4)).transpose()?,
        created_at: from_db_time(&created_at, 5)?,
    })
}

/// Insert a new order for `owner`.
pub async fn create(db: &Database, owner: i64, draft: &OrderDraft) -> Result<Order, PickupError> {
    let preference = draft.preference.as_str();
    let address = draft.address.clone();
    let pickup_time = draft.pickup_time.as_ref().map(to_db_time);
    let now = to_db_time(&Utc::now());
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO orders (user_id, preference, address, pickup_time, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     RETURNING {ORDER_COLUMNS}"
                ),
                params![owner, preference, address, pickup_time, now],
                order_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

/// All of `owner`'s orders, newest first.
pub async fn list_for_owner(db: &Database, owner: i64) -> Result<Vec<Order>, PickupError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![owner], order_from_row)?;
            rows.collect::<rusqlite::Result<Vec<Order>>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Order `id` if it belongs to `owner`.
pub async fn find_for_owner(
    db: &Database,
    id: i64,
    owner: i64,
) -> Result<Option<Order>, PickupError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1 AND user_id = ?2"),
                params![id, owner],
                order_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Replace the mutable fields of order `id` if it belongs to `owner`.
///
/// `created_at` is preserved.
pub async fn update_for_owner(
    db: &Database,
    id: i64,
    owner: i64,
    draft: &OrderDraft,
) -> Result<Option<Order>, PickupError> {
    let preference = draft.preference.as_str();
    let address = draft.address.clone();
    let pickup_time = draft.pickup_time.as_ref().map(to_db_time);
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!(
                    "UPDATE orders SET preference = ?1, address = ?2, pickup_time = ?3
                     WHERE id = ?4 AND user_id = ?5
                     RETURNING {ORDER_COLUMNS}"
                ),
                params![preference, address, pickup_time, id, owner],
                order_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}
