// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Pickup users and orders.
//!
//! A single tokio-rusqlite connection serializes all access. Schema is
//! managed by refinery migrations embedded at compile time.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
