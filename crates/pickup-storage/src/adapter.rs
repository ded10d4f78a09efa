// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pickup_config::model::StorageConfig;
use pickup_core::{
    AdapterType, HealthStatus, Order, OrderDraft, OrderStore, PickupError, PluginAdapter,
    StorageAdapter, User, UserStore,
};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// The database is opened and migrated by [`StorageAdapter::initialize`];
/// every other operation fails with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage; no connection is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, PickupError> {
        self.db.get().ok_or_else(|| PickupError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(db: &Database) -> Result<(), PickupError> {
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PickupError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        match db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
        {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), PickupError> {
        if let Some(db) = self.db.get() {
            Self::checkpoint(db).await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), PickupError> {
        let path = &self.config.database_path;
        let db = Database::open(path, self.config.wal_mode).await?;
        let applied = db.migrate().await?;
        self.db.set(db).map_err(|_| PickupError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %path, applied, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PickupError> {
        Self::checkpoint(self.db()?).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteStorage {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PickupError> {
        queries::users::find_by_email(self.db()?, email).await
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, PickupError> {
        queries::users::find_by_id(self.db()?, id).await
    }

    async fn upsert_user(&self, email: &str, password_hash: &str) -> Result<User, PickupError> {
        queries::users::upsert(self.db()?, email, password_hash).await
    }
}

#[async_trait]
impl OrderStore for SqliteStorage {
    async fn create_order(&self, owner: i64, draft: &OrderDraft) -> Result<Order, PickupError> {
        queries::orders::create(self.db()?, owner, draft).await
    }

    async fn list_orders(&self, owner: i64) -> Result<Vec<Order>, PickupError> {
        queries::orders::list_for_owner(self.db()?, owner).await
    }

    async fn find_order(&self, id: i64, owner: i64) -> Result<Option<Order>, PickupError> {
        queries::orders::find_for_owner(self.db()?, id, owner).await
    }

    async fn update_order(
        &self,
        id: i64,
        owner: i64,
        draft: &OrderDraft,
    ) -> Result<Option<Order>, PickupError> {
        queries::orders::update_for_owner(self.db()?, id, owner, draft).await
    }
}
