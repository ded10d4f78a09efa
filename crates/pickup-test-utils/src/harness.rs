// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end HTTP testing.
//!
//! `TestHarness` assembles the full API stack over a temp SQLite database
//! with a seeded user and scripted providers. Requests are driven through
//! the router in-process; no socket is bound.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::Router;
use http::{Method, Request, StatusCode};
use pickup_config::model::StorageConfig;
use pickup_core::{
    PickupError, PluginAdapter, ProviderAdapter, StorageAdapter, User, UserStore,
};
use pickup_gateway::{build_router, hash_password, AppState, JwtAuth};
use pickup_storage::SqliteStorage;
use pickup_summary::SummaryService;
use serde_json::Value;
use tower::ServiceExt;

use crate::credentials::StaticCredentials;
use crate::mock_provider::MockProvider;

/// Email of the user every harness starts with.
pub const SEED_EMAIL: &str = "user@example.com";
/// Password of the user every harness starts with.
pub const SEED_PASSWORD: &str = "password";

/// Builder for creating test environments with configurable providers.
pub struct TestHarnessBuilder {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    credentials: StaticCredentials,
    summary_timeout: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            providers: Vec::new(),
            credentials: StaticCredentials::new(),
            summary_timeout: Duration::from_secs(5),
        }
    }

    /// Appends a provider in precedence order. `key` of `None` leaves it
    /// unconfigured.
    pub fn with_provider(mut self, provider: Arc<MockProvider>, key: Option<&str>) -> Self {
        if let Some(key) = key {
            self.credentials = self.credentials.with(provider.name(), key);
        }
        self.providers.push(provider);
        self
    }

    /// Overrides the per-call provider deadline.
    pub fn with_summary_timeout(mut self, timeout: Duration) -> Self {
        self.summary_timeout = timeout;
        self
    }

    /// Build the harness: temp database, migrations, seed user, router.
    pub async fn build(self) -> Result<TestHarness, PickupError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| PickupError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        }));
        storage.initialize().await?;

        let user = storage
            .upsert_user(SEED_EMAIL, &hash_password(SEED_PASSWORD)?)
            .await?;

        let tokens = Arc::new(JwtAuth::new("harness-secret", chrono::Duration::hours(1)));
        let summaries = SummaryService::new(
            self.providers,
            Arc::new(self.credentials),
            self.summary_timeout,
        );

        let state = AppState {
            users: storage.clone(),
            orders: storage.clone(),
            tokens: tokens.clone(),
            summaries: Arc::new(summaries),
            storage: storage.clone(),
            start_time: Instant::now(),
        };

        Ok(TestHarness {
            router: build_router(state, true),
            storage,
            tokens,
            user,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete API stack for integration tests.
pub struct TestHarness {
    pub router: Router,
    pub storage: Arc<SqliteStorage>,
    pub tokens: Arc<JwtAuth>,
    /// The seeded user.
    pub user: User,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a builder with no providers configured.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Token for the seeded user, minted directly.
    pub fn token(&self) -> String {
        self.token_for(self.user.id)
    }

    /// Token for an arbitrary user id.
    pub fn token_for(&self, user_id: i64) -> String {
        self.tokens
            .issue(user_id)
            .unwrap_or_else(|e| panic!("issue token: {e}"))
    }

    /// Adds another user with the given credentials.
    pub async fn add_user(&self, email: &str, password: &str) -> User {
        let hash = hash_password(password).unwrap_or_else(|e| panic!("hash password: {e}"));
        self.storage
            .upsert_user(email, &hash)
            .await
            .unwrap_or_else(|e| panic!("add user: {e}"))
    }

    /// Sends a request with an optional bearer token and JSON body.
    ///
    /// Returns the status and the parsed JSON body (`Null` when empty).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|b| b.to_string());
        self.send_raw(method, path, token, body.as_deref()).await
    }

    /// Like [`TestHarness::request`] but with a verbatim body string.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|e| panic!("build request: {e}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("read body: {e}"));
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("parse body: {e}"))
        };
        (status, json)
    }

    /// Logs in through the API and returns the status and body.
    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }
}
