// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pickup order service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Pickup workspace. Provider, storage and
//! auth adapters all implement traits defined here.

pub mod error;
pub mod order;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PickupError;
pub use order::{OrderDraft, OrderInput};
pub use types::{
    AdapterType, AuthIdentity, AuthToken, HealthStatus, Order, OrderFacts, Preference,
    SummaryResult, SummarySource, User,
};

pub use traits::{
    AuthAdapter, CredentialSource, OrderStore, PluginAdapter, ProviderAdapter, StorageAdapter,
    SummaryEvent, SummaryObserver, UserStore,
};
