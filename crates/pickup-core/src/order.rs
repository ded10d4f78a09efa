// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order input validation.
//!
//! Callers submit an [`OrderInput`] (raw strings as they arrive over HTTP) and
//! receive a typed [`OrderDraft`] ready for persistence, or a
//! [`PickupError::Validation`] whose message is returned verbatim to the client.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::PickupError;
use crate::types::Preference;

/// Raw order fields as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderInput {
    #[serde(default)]
    pub preference: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
}

/// A validated order, ready to be created or to replace an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub preference: Preference,
    pub address: Option<String>,
    pub pickup_time: Option<DateTime<Utc>>,
}

impl OrderInput {
    /// Validate the input against the order rules as of `now`.
    ///
    /// - preference must be one of `IN_STORE`, `DELIVERY`, `CURBSIDE`
    /// - `DELIVERY` and `CURBSIDE` need a non-blank address
    /// - anything but `IN_STORE` needs an RFC 3339 pickup time after `now`
    pub fn validate(&self, now: DateTime<Utc>) -> Result<OrderDraft, PickupError> {
        let preference = Preference::from_str(&self.preference).map_err(|_| {
            PickupError::Validation(
                "preference must be IN_STORE, DELIVERY, or CURBSIDE".to_string(),
            )
        })?;

        if preference.requires_address()
            && self
                .address
                .as_deref()
                .is_none_or(|a| a.trim().is_empty())
        {
            return Err(PickupError::Validation(
                "address required for DELIVERY and CURBSIDE".to_string(),
            ));
        }

        let raw_time = self.pickup_time.as_deref().filter(|t| !t.is_empty());
        let pickup_time = match raw_time {
            Some(raw) => Some(parse_rfc3339(raw)?),
            None if preference.requires_pickup_time() => {
                return Err(PickupError::Validation(
                    "pickup_time required when not IN_STORE".to_string(),
                ));
            }
            None => None,
        };

        if preference.requires_pickup_time()
            && let Some(t) = pickup_time
            && t <= now
        {
            return Err(PickupError::Validation(
                "pickup_time must be in the future".to_string(),
            ));
        }

        Ok(OrderDraft {
            preference,
            address: self.address.clone(),
            pickup_time,
        })
    }
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, PickupError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| PickupError::Validation("pickup_time must be RFC3339".to_string()))
}
