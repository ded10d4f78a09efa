// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Pickup REST API.
//!
//! Handles POST /auth/login, GET /me, the /orders resource, order summaries
//! and GET /health.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use pickup_core::{AuthIdentity, HealthStatus, Order, OrderInput, SummaryResult};

use crate::error::ApiError;
use crate::password::verify_password;
use crate::server::AppState;

/// Request body for POST /auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for POST /auth/login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Response body for GET /me.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when storage answers, `degraded` otherwise.
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Parses a path id; only positive integers are valid.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::invalid_id()),
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::invalid_json())?;
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password required".to_string(),
        ));
    }

    let Some(user) = state.users.find_user_by_email(&body.email).await? else {
        tracing::debug!("login rejected: unknown email");
        return Err(ApiError::InvalidCredentials);
    };
    if !verify_password(&body.password, &user.password_hash) {
        tracing::debug!(user_id = user.id, "login rejected: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id)?;
    tracing::info!(user_id = user.id, "login succeeded");
    Ok(Json(LoginResponse { token }))
}

/// GET /me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state
        .users
        .find_user(identity.user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
    }))
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let draft = input.validate(Utc::now())?;
    let order = state.orders.create_order(identity.user_id, &draft).await?;
    tracing::info!(
        order_id = order.id,
        user_id = identity.user_id,
        preference = %order.preference,
        "order created"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_orders(identity.user_id).await?))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(raw_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .orders
        .find_order(id, identity.user_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PUT /orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(raw_id): Path<String>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let draft = input.validate(Utc::now())?;
    let order = state
        .orders
        .update_order(id, identity.user_id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!(order_id = order.id, user_id = identity.user_id, "order updated");
    Ok(Json(order))
}

/// GET /orders/{id}/summary
///
/// Once the order is found this always succeeds; provider trouble shows up
/// as `source: "fallback"`, never as an error status.
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(raw_id): Path<String>,
) -> Result<Json<SummaryResult>, ApiError> {
    let id = parse_id(&raw_id)?;
    let order = state
        .orders
        .find_order(id, identity.user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(state.summaries.produce_summary(&order.facts()).await))
}

/// GET /health
///
/// Public. Reports storage reachability and process uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.storage.health_check().await {
        Ok(HealthStatus::Healthy) => "ok",
        Ok(other) => {
            tracing::warn!(status = ?other, "storage not healthy");
            "degraded"
        }
        Err(e) => {
            tracing::warn!(error = %e, "storage health check failed");
            "degraded"
        }
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers_only() {
        assert_eq!(parse_id("1"), Ok(1));
        assert_eq!(parse_id("9001"), Ok(9001));
        for raw in ["0", "-3", "abc", "1.5", "", " 2"] {
            assert_eq!(parse_id(raw), Err(ApiError::invalid_id()), "{raw:?}");
        }
    }

    #[test]
    fn login_request_tolerates_missing_fields() {
        let body: LoginRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(body.email, "a@b.c");
        assert!(body.password.is_empty());
    }
}
