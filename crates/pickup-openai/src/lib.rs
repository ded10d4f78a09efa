// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for the Pickup order service.
//!
//! This crate implements [`ProviderAdapter`] for the Chat Completions API:
//! one user message in, the first choice's trimmed content out.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use pickup_config::PickupConfig;
use pickup_core::error::PickupError;
use pickup_core::traits::{PluginAdapter, ProviderAdapter};
use pickup_core::types::{AdapterType, HealthStatus};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest};

/// OpenAI chat-completions provider implementing [`ProviderAdapter`].
///
/// Holds no credential; the caller supplies one per request.
pub struct OpenAiProvider {
    client: OpenAiClient,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Creates a provider from the `[openai]` and `[summary]` config sections.
    pub fn new(config: &PickupConfig) -> Result<Self, PickupError> {
        let client = OpenAiClient::new(
            &config.openai.base_url,
            Duration::from_secs(config.summary.timeout_secs),
        )?;

        info!(
            model = config.openai.model,
            endpoint = client.endpoint(),
            "OpenAI provider initialized"
        );

        Ok(Self {
            client,
            model: config.openai.model.clone(),
            max_tokens: config.summary.max_output_tokens,
        })
    }

    fn to_chat_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PickupError> {
        // Not probed; a request would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PickupError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, PickupError> {
        let api_key = credential.trim();
        if api_key.is_empty() {
            return Err(PickupError::provider("OpenAI API key is blank"));
        }

        let response = self
            .client
            .complete(&self.to_chat_request(prompt), api_key)
            .await?;
        Ok(response.first_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> OpenAiProvider {
        let mut config = PickupConfig::default();
        config.openai.base_url = base_url.to_string();
        OpenAiProvider::new(&config).unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
        })
    }

    #[test]
    fn adapter_identity() {
        let p = provider("http://localhost:1");
        assert_eq!(p.name(), "openai");
        assert_eq!(p.adapter_type(), AdapterType::Provider);
        assert_eq!(p.version(), semver::Version::new(0, 1, 0));
    }

    #[test]
    fn request_uses_configured_model_and_cap() {
        let p = provider("http://localhost:1");
        let req = p.to_chat_request("prompt");
        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.max_tokens, 512);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
    }

    #[tokio::test]
    async fn generate_returns_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("\n Your IN STORE order 7 is confirmed. ")),
            )
            .mount(&server)
            .await;

        let text = provider(&server.uri()).generate("p", "sk-live").await.unwrap();
        assert_eq!(text, "Your IN STORE order 7 is confirmed.");
    }

    #[tokio::test]
    async fn credential_is_trimmed_before_use() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sk-padded"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server.uri())
            .generate("p", "  sk-padded\n")
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn empty_choices_is_empty_text_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let text = provider(&server.uri()).generate("p", "sk").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn blank_credential_fails_without_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("never")))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server.uri()).generate("p", "   ").await.unwrap_err();
        assert!(matches!(err, PickupError::Provider { .. }));
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).generate("p", "sk").await.unwrap_err();
        assert!(err.to_string().contains("500"), "{err}");
    }
}
