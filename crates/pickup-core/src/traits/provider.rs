// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for text-generation integrations (OpenAI, Gemini).

use async_trait::async_trait;

use crate::error::PickupError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for an external text-generation API.
///
/// Each implementation owns its wire schema, endpoint, credential placement,
/// and response parsing. A well-formed response with no usable text is
/// `Ok(String::new())`, not an error; deciding what to do with it is the
/// caller's business.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Generates text for a single-turn `prompt`, authenticating with `credential`.
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, PickupError>;
}
