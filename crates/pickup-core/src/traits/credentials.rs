// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential lookup for provider adapters.

use secrecy::SecretString;

/// Resolves the secret for a named provider.
///
/// Implementations are consulted on every request; they must not cache.
/// `None` means the provider is disabled.
pub trait CredentialSource: Send + Sync {
    /// Returns the configured credential for `provider`, if any.
    fn credential(&self, provider: &str) -> Option<SecretString>;
}
