// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary via
//! `embed_migrations!`. Refinery is forward-only; there is no down step.

use pickup_core::PickupError;
use tracing::info;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table. Returns the number of migrations applied by this call.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<usize, PickupError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| PickupError::Storage {
            source: Box::new(e),
        })?;

    let applied = report.applied_migrations();
    for m in applied {
        info!(version = m.version(), name = m.name(), "applied migration");
    }
    Ok(applied.len())
}
