// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session tokens and the bearer authentication middleware.
//!
//! Tokens are compact HS256 JWTs carrying `{user_id, exp}`. The middleware
//! rejects anything without a valid, unexpired token (fail-closed) and
//! hands the verified [`AuthIdentity`] to handlers via request extensions.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use pickup_config::model::AuthConfig;
use pickup_core::{
    AdapterType, AuthAdapter, AuthIdentity, AuthToken, HealthStatus, PickupError, PluginAdapter,
};

use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

const HEADER: JwtHeader<'static> = JwtHeader {
    alg: "HS256",
    typ: "JWT",
};

#[derive(Serialize, Deserialize)]
struct JwtHeader<'a> {
    alg: &'a str,
    typ: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    exp: i64,
}

/// Issues and verifies HS256 session tokens.
pub struct JwtAuth {
    secret: SecretString,
    ttl: Duration,
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("secret", &"[redacted]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtAuth {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            ttl,
        }
    }

    /// Builds the signer from `[auth]`. An empty secret or a zero TTL is a
    /// configuration error.
    pub fn from_config(config: &AuthConfig) -> Result<Self, PickupError> {
        if config.jwt_secret.is_empty() {
            return Err(PickupError::Config("auth.jwt_secret must not be empty".into()));
        }
        if config.token_ttl_hours == 0 {
            return Err(PickupError::Config(
                "auth.token_ttl_hours must be at least 1".into(),
            ));
        }
        Ok(Self::new(
            config.jwt_secret.clone(),
            Duration::hours(i64::from(config.token_ttl_hours)),
        ))
    }

    fn mac(&self) -> Result<HmacSha256, PickupError> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| PickupError::Internal(format!("hmac key: {e}")))
    }

    /// Signs a token for `user_id` that expires after the configured TTL.
    pub fn issue(&self, user_id: i64) -> Result<String, PickupError> {
        let claims = Claims {
            user_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, PickupError> {
        let header = serde_json::to_vec(&HEADER)
            .map_err(|e| PickupError::Internal(format!("encode token header: {e}")))?;
        let payload = serde_json::to_vec(claims)
            .map_err(|e| PickupError::Internal(format!("encode token claims: {e}")))?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{signing_input}.{signature}"))
    }

    /// Checks signature, algorithm and expiry; returns the caller identity.
    pub fn verify(&self, token: &str) -> Result<AuthIdentity, PickupError> {
        let invalid = |reason: &str| PickupError::Auth(reason.to_string());

        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("malformed token"));
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| invalid("malformed token header"))?;
        let header: JwtHeader<'_> =
            serde_json::from_slice(&header_bytes).map_err(|_| invalid("malformed token header"))?;
        if header.alg != HEADER.alg {
            return Err(invalid("unsupported token algorithm"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| invalid("malformed token signature"))?;
        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| invalid("bad token signature"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| invalid("malformed token claims"))?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| invalid("malformed token claims"))?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(invalid("token expired"));
        }

        Ok(AuthIdentity {
            user_id: claims.user_id,
        })
    }
}

#[async_trait]
impl PluginAdapter for JwtAuth {
    fn name(&self) -> &str {
        "jwt"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, PickupError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PickupError> {
        Ok(())
    }
}

#[async_trait]
impl AuthAdapter for JwtAuth {
    async fn authenticate(&self, token: AuthToken) -> Result<AuthIdentity, PickupError> {
        self.verify(&token.0)
    }
}

/// Middleware that requires `Authorization: Bearer <token>`.
///
/// On success the [`AuthIdentity`] is inserted into request extensions.
pub async fn require_bearer(
    State(auth): State<Arc<dyn AuthAdapter>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let identity = match auth.authenticate(AuthToken(token.to_string())).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            return Err(ApiError::Unauthorized);
        }
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
