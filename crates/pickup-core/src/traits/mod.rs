// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod auth;
pub mod credentials;
pub mod observability;
pub mod provider;
pub mod storage;

pub use adapter::PluginAdapter;
pub use auth::AuthAdapter;
pub use credentials::CredentialSource;
pub use observability::{SummaryEvent, SummaryObserver};
pub use provider::ProviderAdapter;
pub use storage::{OrderStore, StorageAdapter, UserStore};
