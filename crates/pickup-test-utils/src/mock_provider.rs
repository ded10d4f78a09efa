// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted text-generation provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with queued outcomes and
//! records every call, so tests can assert which provider was invoked and how
//! often without any external API.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use pickup_core::traits::adapter::PluginAdapter;
use pickup_core::traits::provider::ProviderAdapter;
use pickup_core::types::{AdapterType, HealthStatus};
use pickup_core::PickupError;

/// Text returned once the scripted queue is exhausted.
pub const DEFAULT_MOCK_TEXT: &str = "mock summary";

/// A mock provider that replays queued outcomes in FIFO order.
pub struct MockProvider {
    name: String,
    outcomes: Mutex<VecDeque<Result<String, PickupError>>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
    last_prompt: Mutex<Option<String>>,
    last_credential: Mutex<Option<String>>,
}

impl MockProvider {
    /// Creates a mock whose adapter name is `name` (used for credential lookup).
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcomes: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            delay: Mutex::new(None),
            last_prompt: Mutex::new(None),
            last_credential: Mutex::new(None),
        }
    }

    /// Queues a successful answer.
    pub fn push_ok(&self, text: &str) {
        self.lock_outcomes().push_back(Ok(text.to_string()));
    }

    /// Queues a failure.
    pub fn push_err(&self, error: PickupError) {
        self.lock_outcomes().push_back(Err(error));
    }

    /// Makes every subsequent call sleep for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap_or_else(|e| e.into_inner()) = Some(delay);
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.last_credential
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_outcomes(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, PickupError>>> {
        self.outcomes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::named("mock-provider")
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PickupError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PickupError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, PickupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap_or_else(|e| e.into_inner()) = Some(prompt.to_string());
        *self.last_credential.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(credential.to_string());

        // Take the outcome before sleeping so concurrent callers each get their own.
        let outcome = self
            .lock_outcomes()
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_TEXT.to_string()));

        let delay = *self.delay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        outcome
    }
}
