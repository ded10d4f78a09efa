// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order summary generation for the Pickup order service.
//!
//! - [`describe_order`]: deterministic text rendering of an order's facts
//! - [`SummaryService`]: picks at most one provider, enforces the timeout,
//!   and falls back to a fixed sentence on any failure
//! - [`ConfigCredentials`]: per-request key lookup (config, then env)
//! - [`TracingObserver`]: default operational sink

pub mod credentials;
pub mod description;
pub mod observer;
pub mod service;

pub use credentials::ConfigCredentials;
pub use description::describe_order;
pub use observer::TracingObserver;
pub use service::{SummaryService, FALLBACK_SUMMARY, PROMPT_PREFIX};
