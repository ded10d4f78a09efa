// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! The API key travels as the `key` query parameter, never as a header.

use std::time::Duration;

use pickup_core::PickupError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    /// Creates a client for `{base_url}/v1beta/models/{model}:generateContent`.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, PickupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PickupError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{model}:generateContent",
                base_url.trim_end_matches('/')
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one generation request authenticated with `api_key`.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
        api_key: &str,
    ) -> Result<GenerateContentResponse, PickupError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            // reqwest embeds the URL in its errors; strip it so the key stays out of logs.
            .map_err(|e| {
                let e = e.without_url();
                PickupError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        debug!(status = %status, "generateContent response received");

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            PickupError::Provider {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) if !api_err.error.message.is_empty() => {
                    debug!(
                        code = ?api_err.error.code,
                        error_status = ?api_err.error.status,
                        "Gemini error envelope"
                    );
                    format!("Gemini API error: {}", api_err.error.message)
                }
                _ => format!("Gemini API returned {status}"),
            };
            return Err(PickupError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| PickupError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
