// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observability sink for summary generation.

use crate::error::PickupError;

/// A diagnostic event emitted while producing a summary.
#[derive(Debug)]
pub enum SummaryEvent<'a> {
    /// No provider had a credential; generation was skipped.
    NoProviderConfigured { order_id: i64 },
    /// A prompt is about to be sent to `provider`.
    PromptSent { provider: &'a str, prompt: &'a str },
    /// The provider call failed.
    ProviderFailed {
        provider: &'a str,
        error: &'a PickupError,
    },
    /// The provider answered without usable text.
    EmptyResponse { provider: &'a str },
    /// The provider produced a summary.
    Generated { provider: &'a str, text: &'a str },
}

/// Records summary events to an operational sink.
///
/// Recording is fire-and-forget: implementations must swallow their own
/// failures so the returned summary is never affected.
pub trait SummaryObserver: Send + Sync {
    /// Records one event.
    fn record(&self, event: SummaryEvent<'_>);
}
