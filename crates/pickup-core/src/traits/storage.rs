// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter traits for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::PickupError;
use crate::order::OrderDraft;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Order, User};

/// Adapter for storage and persistence backends.
///
/// Storage adapters manage the lifecycle of database connections.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), PickupError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), PickupError>;
}

/// User account lookup and provisioning.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by email address.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PickupError>;

    /// Finds a user by id.
    async fn find_user(&self, id: i64) -> Result<Option<User>, PickupError>;

    /// Creates the user or replaces the password hash of an existing one.
    async fn upsert_user(&self, email: &str, password_hash: &str) -> Result<User, PickupError>;
}

/// Owner-scoped order persistence.
///
/// Every lookup is scoped to `owner`; an order belonging to someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Creates a new order for `owner`.
    async fn create_order(&self, owner: i64, draft: &OrderDraft) -> Result<Order, PickupError>;

    /// Lists `owner`'s orders, newest first.
    async fn list_orders(&self, owner: i64) -> Result<Vec<Order>, PickupError>;

    /// Finds order `id` if it belongs to `owner`.
    async fn find_order(&self, id: i64, owner: i64) -> Result<Option<Order>, PickupError>;

    /// Replaces order `id` if it belongs to `owner`; `None` when no such order.
    async fn update_order(
        &self,
        id: i64,
        owner: i64,
        draft: &OrderDraft,
    ) -> Result<Option<Order>, PickupError>;
}
