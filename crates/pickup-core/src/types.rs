// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Pickup service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
    Auth,
}

/// How the customer wants to receive an order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Preference {
    InStore,
    Delivery,
    Curbside,
}

impl Preference {
    /// Wire and storage representation (`IN_STORE`, `DELIVERY`, `CURBSIDE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::InStore => "IN_STORE",
            Preference::Delivery => "DELIVERY",
            Preference::Curbside => "CURBSIDE",
        }
    }

    /// Whether orders with this preference must carry an address.
    pub fn requires_address(&self) -> bool {
        matches!(self, Preference::Delivery | Preference::Curbside)
    }

    /// Whether orders with this preference must carry a future pickup time.
    pub fn requires_pickup_time(&self) -> bool {
        !matches!(self, Preference::InStore)
    }
}

/// A registered user.
#[derive(Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

/// A persisted order owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub preference: Preference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot of the fields that feed a summary.
    pub fn facts(&self) -> OrderFacts {
        OrderFacts {
            id: self.id,
            preference: self.preference,
            address: self.address.clone(),
            pickup_time: self.pickup_time,
            created_at: self.created_at,
        }
    }
}

/// The immutable facts about one order used to build a summary.
///
/// Lives only for the duration of a single summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFacts {
    pub id: i64,
    pub preference: Preference,
    pub address: Option<String>,
    pub pickup_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Where a summary's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SummarySource {
    Ai,
    Fallback,
}

/// The only externally visible output of summary generation.
///
/// `summary` is never empty and `source` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub source: SummarySource,
}

/// A bearer token presented by a caller.
#[derive(Clone)]
pub struct AuthToken(pub String);

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([redacted])")
    }
}

/// A verified caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthIdentity {
    pub user_id: i64,
}
