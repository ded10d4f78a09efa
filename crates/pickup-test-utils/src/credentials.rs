// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`CredentialSource`] that never touches the environment.

use std::collections::HashMap;

use pickup_core::CredentialSource;
use secrecy::SecretString;

/// Fixed provider-name to key mapping.
#[derive(Default)]
pub struct StaticCredentials {
    keys: HashMap<String, String>,
}

impl StaticCredentials {
    /// No credentials at all: every provider is disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the key for `provider`.
    pub fn with(mut self, provider: &str, key: &str) -> Self {
        self.keys.insert(provider.to_string(), key.to_string());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, provider: &str) -> Option<SecretString> {
        self.keys
            .get(provider)
            .map(|k| SecretString::from(k.clone()))
    }
}
