// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`SummaryObserver`] that writes summary events to `tracing`.

use pickup_core::{SummaryEvent, SummaryObserver};
use tracing::{debug, info, warn};

/// Default observer: every event becomes one structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SummaryObserver for TracingObserver {
    fn record(&self, event: SummaryEvent<'_>) {
        match event {
            SummaryEvent::NoProviderConfigured { order_id } => {
                debug!(order_id, "no provider credential configured, using fallback summary");
            }
            SummaryEvent::PromptSent { provider, prompt } => {
                info!(provider, prompt, "order summary prompt");
            }
            SummaryEvent::ProviderFailed { provider, error } => {
                warn!(provider, error = %error, "order summary provider call failed");
            }
            SummaryEvent::EmptyResponse { provider } => {
                warn!(provider, "order summary provider returned empty content, using fallback");
            }
            SummaryEvent::Generated { provider, text } => {
                info!(provider, chars = text.chars().count(), text, "order summary generated");
            }
        }
    }
}
