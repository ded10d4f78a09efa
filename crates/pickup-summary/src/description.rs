// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic plain-text rendering of an order's facts.
//!
//! The output is the "details" half of a summary prompt, so the same facts
//! must always produce byte-identical text.

use chrono::{DateTime, SecondsFormat, Utc};
use pickup_core::OrderFacts;

/// Rendered in place of an absent address or pickup time.
pub const NONE_PLACEHOLDER: &str = "(none)";

const SEGMENT_SEPARATOR: &str = ". ";

/// Renders `facts` as `Order number: .. . Preference: .. . Address: ..`
/// `. Pickup time: .. . Creation date: ..`.
///
/// Underscores in the preference become spaces. An address that is blank
/// after trimming counts as absent. Timestamps are RFC 3339 UTC to the second.
pub fn describe_order(facts: &OrderFacts) -> String {
    let address = facts
        .address
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(NONE_PLACEHOLDER);
    let pickup_time = facts
        .pickup_time
        .as_ref()
        .map(rfc3339)
        .unwrap_or_else(|| NONE_PLACEHOLDER.to_string());

    [
        format!("Order number: {}", facts.id),
        format!("Preference: {}", facts.preference.as_str().replace('_', " ")),
        format!("Address: {address}"),
        format!("Pickup time: {pickup_time}"),
        format!("Creation date: {}", rfc3339(&facts.created_at)),
    ]
    .join(SEGMENT_SEPARATOR)
}

fn rfc3339(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}
