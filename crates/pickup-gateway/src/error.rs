// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP error responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with a fitting
//! status code. Internal details are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pickup_core::PickupError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a handler can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with a client-facing message.
    BadRequest(String),
    /// 401 for a missing, malformed, or expired bearer token.
    Unauthorized,
    /// 401 for a failed login.
    InvalidCredentials,
    /// 404 for missing or foreign resources.
    NotFound,
    /// 500; details are logged at the conversion site.
    Internal,
}

impl ApiError {
    pub fn invalid_json() -> Self {
        ApiError::BadRequest("invalid json".to_string())
    }

    pub fn invalid_id() -> Self {
        ApiError::BadRequest("invalid id".to_string())
    }

    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        }
    }
}

impl From<PickupError> for ApiError {
    fn from(err: PickupError) -> Self {
        match err {
            PickupError::Validation(msg) => ApiError::BadRequest(msg),
            PickupError::NotFound(_) => ApiError::NotFound,
            PickupError::Auth(_) => ApiError::Unauthorized,
            other => {
                tracing::error!(error = %other, "request failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pickup_errors_map_to_client_categories() {
        assert_eq!(
            ApiError::from(PickupError::Validation("pickup_time must be in the future".into())),
            ApiError::BadRequest("pickup_time must be in the future".into())
        );
        assert_eq!(
            ApiError::from(PickupError::NotFound("order 3".into())),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from(PickupError::Auth("expired".into())),
            ApiError::Unauthorized
        );
        assert_eq!(
            ApiError::from(PickupError::Storage {
                source: "disk full".into()
            }),
            ApiError::Internal
        );
    }

    #[test]
    fn status_codes_and_messages() {
        assert_eq!(
            ApiError::invalid_id().status_and_message(),
            (StatusCode::BAD_REQUEST, "invalid id")
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_and_message(),
            (StatusCode::UNAUTHORIZED, "invalid credentials")
        );
        assert_eq!(
            ApiError::Internal.status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        );
    }

    #[test]
    fn response_carries_status() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
