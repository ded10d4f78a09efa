// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for the Pickup order service.
//!
//! Implements [`ProviderAdapter`] over `generateContent`. The text of every
//! part in the first candidate is concatenated in order.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use pickup_config::PickupConfig;
use pickup_core::error::PickupError;
use pickup_core::traits::{PluginAdapter, ProviderAdapter};
use pickup_core::types::{AdapterType, HealthStatus};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Gemini provider implementing [`ProviderAdapter`].
pub struct GeminiProvider {
    client: GeminiClient,
    max_output_tokens: u32,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` and `[summary]` config sections.
    pub fn new(config: &PickupConfig) -> Result<Self, PickupError> {
        let client = GeminiClient::new(
            &config.gemini.base_url,
            &config.gemini.model,
            Duration::from_secs(config.summary.timeout_secs),
        )?;

        info!(model = config.gemini.model, "Gemini provider initialized");

        Ok(Self {
            client,
            max_output_tokens: config.summary.max_output_tokens,
        })
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
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
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, PickupError> {
        let api_key = credential.trim();
        if api_key.is_empty() {
            return Err(PickupError::provider("Gemini API key is blank"));
        }

        let request = GenerateContentRequest::single_prompt(prompt, self.max_output_tokens);
        let response = self.client.generate_content(&request, api_key).await?;
        Ok(response.joined_text())
    }
}
