// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pickup integration tests.
//!
//! - [`MockProvider`]: scripted provider that counts calls
//! - [`StaticCredentials`]: credential source that never reads the environment
//! - [`TestHarness`]: temp SQLite database, seeded user and a ready router

pub mod credentials;
pub mod harness;
pub mod mock_provider;

pub use credentials::StaticCredentials;
pub use harness::{TestHarness, TestHarnessBuilder, SEED_EMAIL, SEED_PASSWORD};
pub use mock_provider::MockProvider;
