// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summary orchestration: provider selection, one bounded attempt, fallback.

use std::sync::Arc;
use std::time::Duration;

use pickup_core::{
    CredentialSource, OrderFacts, PickupError, ProviderAdapter, SummaryEvent,
    SummaryObserver, SummaryResult, SummarySource,
};
use secrecy::{ExposeSecret, SecretString};

use crate::description::describe_order;
use crate::observer::TracingObserver;

/// Returned whenever no provider produced usable text.
pub const FALLBACK_SUMMARY: &str = "Unable to generate Summary";

/// Instruction placed in front of the order description.
pub const PROMPT_PREFIX: &str = "Create the order summary for the customer in one or two complete sentences. Include order number, preference, address, pickup time. Use the following order details: ";

/// Produces order summaries from an ordered list of providers.
///
/// Providers are tried in precedence order only for *selection*: the first
/// one with a credential is called, once, and its outcome is final. A
/// failure never falls through to the next provider.
pub struct SummaryService {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    credentials: Arc<dyn CredentialSource>,
    observer: Arc<dyn SummaryObserver>,
    timeout: Duration,
}

impl SummaryService {
    /// `providers` must be in precedence order; each is keyed into
    /// `credentials` by its adapter name.
    pub fn new(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        credentials: Arc<dyn CredentialSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            providers,
            credentials,
            observer: Arc::new(TracingObserver),
            timeout,
        }
    }

    /// Replaces the default [`TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn SummaryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Names of the configured providers, in precedence order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Full prompt sent to a provider for `facts`.
    pub fn build_prompt(facts: &OrderFacts) -> String {
        format!("{PROMPT_PREFIX}{}", describe_order(facts))
    }

    /// Summarizes `facts`. Never fails: every error path yields the fallback.
    pub async fn produce_summary(&self, facts: &OrderFacts) -> SummaryResult {
        let Some((provider, credential)) = self.select_provider() else {
            self.observer
                .record(SummaryEvent::NoProviderConfigured { order_id: facts.id });
            return fallback();
        };

        let name = provider.name();
        let prompt = Self::build_prompt(facts);
        self.observer.record(SummaryEvent::PromptSent {
            provider: name,
            prompt: &prompt,
        });

        let attempt = tokio::time::timeout(
            self.timeout,
            provider.generate(&prompt, credential.expose_secret()),
        )
        .await
        .unwrap_or_else(|_| {
            Err(PickupError::Timeout {
                duration: self.timeout,
            })
        });

        match attempt {
            Err(error) => {
                self.observer.record(SummaryEvent::ProviderFailed {
                    provider: name,
                    error: &error,
                });
                fallback()
            }
            Ok(text) if text.trim().is_empty() => {
                self.observer
                    .record(SummaryEvent::EmptyResponse { provider: name });
                fallback()
            }
            Ok(text) => {
                self.observer.record(SummaryEvent::Generated {
                    provider: name,
                    text: &text,
                });
                SummaryResult {
                    summary: text,
                    source: SummarySource::Ai,
                }
            }
        }
    }

    /// First provider, in precedence order, with a non-blank credential.
    fn select_provider(&self) -> Option<(&Arc<dyn ProviderAdapter>, SecretString)> {
        self.providers.iter().find_map(|p| {
            self.credentials
                .credential(p.name())
                .filter(|c| !c.expose_secret().trim().is_empty())
                .map(|c| (p, c))
        })
    }
}

fn fallback() -> SummaryResult {
    SummaryResult {
        summary: FALLBACK_SUMMARY.to_string(),
        source: SummarySource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pickup_core::Preference;
    use pickup_test_utils::{MockProvider, StaticCredentials};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn kinds(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SummaryObserver for RecordingObserver {
        fn record(&self, event: SummaryEvent<'_>) {
            let kind = match event {
                SummaryEvent::NoProviderConfigured { .. } => "none".to_string(),
                SummaryEvent::PromptSent { provider, .. } => format!("prompt:{provider}"),
                SummaryEvent::ProviderFailed { provider, .. } => format!("failed:{provider}"),
                SummaryEvent::EmptyResponse { provider } => format!("empty:{provider}"),
                SummaryEvent::Generated { provider, .. } => format!("generated:{provider}"),
            };
            self.events.lock().unwrap().push(kind);
        }
    }

    fn order_7() -> OrderFacts {
        OrderFacts {
            id: 7,
            preference: Preference::InStore,
            address: None,
            pickup_time: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    struct Fixture {
        openai: Arc<MockProvider>,
        gemini: Arc<MockProvider>,
        observer: Arc<RecordingObserver>,
        service: SummaryService,
    }

    fn fixture(credentials: StaticCredentials, timeout: Duration) -> Fixture {
        let openai = Arc::new(MockProvider::named("openai"));
        let gemini = Arc::new(MockProvider::named("gemini"));
        let observer = Arc::new(RecordingObserver::default());
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            openai.clone() as Arc<dyn ProviderAdapter>,
            gemini.clone() as Arc<dyn ProviderAdapter>,
        ];
        let service = SummaryService::new(
            providers,
            Arc::new(credentials),
            timeout,
        )
        .with_observer(observer.clone());
        Fixture {
            openai,
            gemini,
            observer,
            service,
        }
    }

    #[test]
    fn prompt_is_prefix_plus_description() {
        let prompt = SummaryService::build_prompt(&order_7());
        assert!(prompt.starts_with("Create the order summary for the customer"));
        assert!(prompt.ends_with(
            "Use the following order details: Order number: 7. Preference: IN STORE. \
             Address: (none). Pickup time: (none). Creation date: 2025-01-01T00:00:00Z"
        ));
    }

    #[tokio::test]
    async fn no_credentials_yields_fallback_without_calls() {
        let f = fixture(StaticCredentials::new(), Duration::from_secs(1));

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(result.summary, FALLBACK_SUMMARY);
        assert_eq!(result.source, SummarySource::Fallback);
        assert_eq!(f.openai.calls(), 0);
        assert_eq!(f.gemini.calls(), 0);
        assert_eq!(f.observer.kinds(), vec!["none"]);
    }

    #[tokio::test]
    async fn openai_success_is_returned_verbatim() {
        let f = fixture(
            StaticCredentials::new().with("openai", "sk-1"),
            Duration::from_secs(1),
        );
        f.openai
            .push_ok("Your in-store order #7 was placed on January 1, 2025.");

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(
            result.summary,
            "Your in-store order #7 was placed on January 1, 2025."
        );
        assert_eq!(result.source, SummarySource::Ai);
        assert_eq!(f.openai.last_credential().as_deref(), Some("sk-1"));
        assert_eq!(f.observer.kinds(), vec!["prompt:openai", "generated:openai"]);
    }

    #[tokio::test]
    async fn openai_takes_precedence_when_both_configured() {
        let f = fixture(
            StaticCredentials::new().with("openai", "sk").with("gemini", "g"),
            Duration::from_secs(1),
        );
        f.openai.push_ok("from openai");
        f.gemini.push_ok("from gemini");

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(result.summary, "from openai");
        assert_eq!(f.openai.calls(), 1);
        assert_eq!(f.gemini.calls(), 0);
    }

    #[tokio::test]
    async fn openai_failure_does_not_fall_through_to_gemini() {
        let f = fixture(
            StaticCredentials::new().with("openai", "sk").with("gemini", "g"),
            Duration::from_secs(1),
        );
        f.openai.push_err(PickupError::provider("OpenAI API returned 429 Too Many Requests"));
        f.gemini.push_ok("should never be used");

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(result.summary, FALLBACK_SUMMARY);
        assert_eq!(result.source, SummarySource::Fallback);
        assert_eq!(f.openai.calls(), 1);
        assert_eq!(f.gemini.calls(), 0);
        assert_eq!(f.observer.kinds(), vec!["prompt:openai", "failed:openai"]);
    }

    #[tokio::test]
    async fn gemini_used_when_only_its_key_is_set() {
        let f = fixture(
            StaticCredentials::new().with("openai", "   ").with("gemini", "g"),
            Duration::from_secs(1),
        );
        f.gemini.push_ok("Hello, your order is ready.");

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(result.summary, "Hello, your order is ready.");
        assert_eq!(result.source, SummarySource::Ai);
        assert_eq!(f.openai.calls(), 0);
        assert_eq!(f.gemini.calls(), 1);
    }

    #[tokio::test]
    async fn blank_answer_yields_fallback() {
        let f = fixture(
            StaticCredentials::new().with("gemini", "g"),
            Duration::from_secs(1),
        );
        f.gemini.push_ok("  \n ");

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(result.summary, FALLBACK_SUMMARY);
        assert_eq!(result.source, SummarySource::Fallback);
        assert_eq!(f.observer.kinds(), vec!["prompt:gemini", "empty:gemini"]);
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_fallback() {
        let f = fixture(
            StaticCredentials::new().with("openai", "sk"),
            Duration::from_millis(20),
        );
        f.openai.set_delay(Duration::from_millis(500));
        f.openai.push_ok("too late");

        let result = f.service.produce_summary(&order_7()).await;

        assert_eq!(result.source, SummarySource::Fallback);
        assert_eq!(f.observer.kinds(), vec!["prompt:openai", "failed:openai"]);
    }

    #[tokio::test]
    async fn prompt_reaches_the_provider() {
        let f = fixture(
            StaticCredentials::new().with("openai", "sk"),
            Duration::from_secs(1),
        );
        f.openai.push_ok("ok");

        f.service.produce_summary(&order_7()).await;

        let prompt = f.openai.last_prompt().unwrap();
        assert_eq!(prompt, SummaryService::build_prompt(&order_7()));
    }

    #[tokio::test]
    async fn concurrent_summaries_are_independent() {
        let f = fixture(
            StaticCredentials::new().with("openai", "sk"),
            Duration::from_secs(1),
        );
        f.openai.push_ok("first");
        f.openai.push_err(PickupError::provider("boom"));

        let (first, second) = (order_7(), order_7());
        let (a, b) = tokio::join!(
            f.service.produce_summary(&first),
            f.service.produce_summary(&second)
        );

        let mut sources = vec![a.source, b.source];
        sources.sort_by_key(|s| s.to_string());
        assert_eq!(sources, vec![SummarySource::Ai, SummarySource::Fallback]);
        assert_eq!(f.openai.calls(), 2);
    }

    #[test]
    fn provider_names_keep_precedence_order() {
        let f = fixture(StaticCredentials::new(), Duration::from_secs(1));
        assert_eq!(f.service.provider_names(), vec!["openai", "gemini"]);
    }
}
