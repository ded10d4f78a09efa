// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction, bearer
//! authentication and error classification. One attempt per call; there is
//! no retry loop.

use std::time::Duration;

use pickup_core::PickupError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Path appended to the configured base URL.
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a client posting to `{base_url}/v1/chat/completions`.
    ///
    /// `timeout` bounds each request end to end.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PickupError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| PickupError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{CHAT_COMPLETIONS_PATH}",
                base_url.trim_end_matches('/')
            ),
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a completion request authenticated with `api_key`.
    ///
    /// Non-2xx responses become [`PickupError::Provider`] carrying the
    /// envelope's `error.message` when present, else the status line.
    pub async fn complete(
        &self,
        request: &ChatRequest,
        api_key: &str,
    ) -> Result<ChatResponse, PickupError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| PickupError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "chat completion response received");

        let body = response.text().await.map_err(|e| PickupError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) if !api_err.error.message.is_empty() => {
                    debug!(error_type = ?api_err.error.type_, "OpenAI error envelope");
                    format!("OpenAI API error: {}", api_err.error.message)
                }
                _ => format!("OpenAI API returned {status}"),
            };
            return Err(PickupError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| PickupError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("Hello")],
            max_tokens: 512,
        }
    }

    fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let c = OpenAiClient::new("https://api.openai.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(c.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn sends_bearer_header_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 512,
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Hi"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client(&server).complete(&request(), "sk-test").await.unwrap();
        assert_eq!(resp.first_text(), "Hi");
    }

    #[tokio::test]
    async fn error_envelope_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client(&server).complete(&request(), "bad").await.unwrap_err();
        assert!(matches!(err, PickupError::Provider { .. }));
        assert!(err.to_string().contains("Incorrect API key provided"), "{err}");
    }

    #[tokio::test]
    #[traced_test]
    async fn error_envelope_type_is_logged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "quota exceeded", "type": "insufficient_quota"}
            })))
            .mount(&server)
            .await;

        client(&server).complete(&request(), "sk").await.unwrap_err();
        assert!(logs_contain("insufficient_quota"));
    }

    #[tokio::test]
    async fn status_line_used_without_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client(&server).complete(&request(), "sk").await.unwrap_err();
        assert!(err.to_string().contains("429 Too Many Requests"), "{err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server).complete(&request(), "sk").await.unwrap_err();
        assert!(err.to_string().contains("failed to parse"), "{err}");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let c = OpenAiClient::new(&server.uri(), Duration::from_millis(50)).unwrap();
        let err = c.complete(&request(), "sk").await.unwrap_err();
        assert!(err.to_string().contains("HTTP request failed"), "{err}");
    }
}
