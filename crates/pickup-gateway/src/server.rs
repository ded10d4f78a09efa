// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use pickup_config::model::ServerConfig;
use pickup_core::{AuthAdapter, OrderStore, PickupError, PluginAdapter, UserStore};
use pickup_summary::SummaryService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_bearer, JwtAuth};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub orders: Arc<dyn OrderStore>,
    /// Issues tokens at login and verifies them in the middleware.
    pub tokens: Arc<JwtAuth>,
    pub summaries: Arc<SummaryService>,
    /// Probed by GET /health.
    pub storage: Arc<dyn PluginAdapter>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Builds the full route table.
///
/// - POST /auth/login, GET /health (public)
/// - GET /me, GET|POST /orders, GET|PUT /orders/{id},
///   GET /orders/{id}/summary (bearer auth)
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let verifier: Arc<dyn AuthAdapter> = state.tokens.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/login", post(handlers::login))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/me", get(handlers::me))
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/orders/{id}",
            get(handlers::get_order).put(handlers::update_order),
        )
        .route("/orders/{id}/summary", get(handlers::get_summary))
        .route_layer(axum_middleware::from_fn_with_state(
            verifier,
            require_bearer,
        ))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Binds `bind_address:port` and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), PickupError> {
    let app = build_router(state, config.cors_permissive);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PickupError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("Pickup API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| PickupError::Internal(format!("server error: {e}")))?;

    tracing::info!("Pickup API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use pickup_core::{
        AdapterType, CredentialSource, HealthStatus, Order, OrderDraft, User,
    };
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::password::hash_password;

    #[derive(Default)]
    struct MemoryStore {
        users: Mutex<Vec<User>>,
        orders: Mutex<Vec<Order>>,
    }

    #[async_trait]
    impl PluginAdapter for MemoryStore {
        fn name(&self) -> &str {
            "memory"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Storage
        }
        async fn health_check(&self) -> Result<HealthStatus, PickupError> {
            Ok(HealthStatus::Healthy)
        }
        async fn shutdown(&self) -> Result<(), PickupError> {
            Ok(())
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PickupError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }
        async fn find_user(&self, id: i64) -> Result<Option<User>, PickupError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }
        async fn upsert_user(&self, email: &str, hash: &str) -> Result<User, PickupError> {
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: users.len() as i64 + 1,
                email: email.into(),
                password_hash: hash.into(),
            };
            users.push(user.clone());
            Ok(user)
        }
    }

    #[async_trait]
    impl OrderStore for MemoryStore {
        async fn create_order(&self, owner: i64, draft: &OrderDraft) -> Result<Order, PickupError> {
            let mut orders = self.orders.lock().unwrap();
            let order = Order {
                id: orders.len() as i64 + 1,
                user_id: owner,
                preference: draft.preference,
                address: draft.address.clone(),
                pickup_time: draft.pickup_time,
                created_at: chrono::Utc::now(),
            };
            orders.push(order.clone());
            Ok(order)
        }
        async fn list_orders(&self, owner: i64) -> Result<Vec<Order>, PickupError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|o| o.user_id == owner)
                .cloned()
                .collect())
        }
        async fn find_order(&self, id: i64, owner: i64) -> Result<Option<Order>, PickupError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id == id && o.user_id == owner)
                .cloned())
        }
        async fn update_order(
            &self,
            _id: i64,
            _owner: i64,
            _draft: &OrderDraft,
        ) -> Result<Option<Order>, PickupError> {
            Ok(None)
        }
    }

    struct NoKeys;

    impl CredentialSource for NoKeys {
        fn credential(&self, _provider: &str) -> Option<SecretString> {
            None
        }
    }

    async fn test_router() -> (Router, Arc<JwtAuth>, i64) {
        let store = Arc::new(MemoryStore::default());
        let user = store
            .upsert_user("user@example.com", &hash_password("password").unwrap())
            .await
            .unwrap();
        let tokens = Arc::new(JwtAuth::new("test-secret", chrono::Duration::hours(1)));
        let state = AppState {
            users: store.clone(),
            orders: store.clone(),
            tokens: tokens.clone(),
            summaries: Arc::new(SummaryService::new(
                Vec::new(),
                Arc::new(NoKeys),
                Duration::from_secs(1),
            )),
            storage: store,
            start_time: Instant::now(),
        };
        (build_router(state, true), tokens, user.id)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _, _) = test_router().await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn protected_routes_require_bearer() {
        let (app, _, _) = test_router().await;
        for path in ["/me", "/orders", "/orders/1", "/orders/1/summary"] {
            let response = app
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
            assert_eq!(body_json(response).await["error"], "unauthorized");
        }

        let response = app
            .oneshot(
                Request::get("/me")
                    .header("authorization", "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_then_me() {
        let (app, _, user_id) = test_router().await;
        let response = app
            .clone()
            .oneshot(
                Request::post("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"email":"user@example.com","password":"password"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get("/me")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], user_id);
        assert_eq!(json["email"], "user@example.com");
    }

    #[tokio::test]
    async fn summary_without_providers_is_fallback() {
        let (app, tokens, user_id) = test_router().await;
        let token = tokens.issue(user_id).unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::post("/orders")
                    .header("authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"preference":"IN_STORE"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_i64().unwrap();

        let response = app
            .oneshot(
                Request::get(format!("/orders/{id}/summary"))
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["summary"], "Unable to generate Summary");
        assert_eq!(json["source"], "fallback");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let (app, tokens, user_id) = test_router().await;
        let token = tokens.issue(user_id).unwrap();
        let response = app
            .oneshot(
                Request::get("/orders/abc/summary")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "invalid id");
    }
}
