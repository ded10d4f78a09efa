// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and positive limits.

use crate::diagnostic::ConfigError;
use crate::model::PickupConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PickupConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let addr = config.server.bind_address.trim();
    if addr.is_empty() {
        fail("server.bind_address must not be empty".to_string());
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.bind_address `{addr}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must be non-zero".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.auth.jwt_secret.trim().is_empty() {
        fail("auth.jwt_secret must not be empty".to_string());
    }

    if config.auth.token_ttl_hours == 0 {
        fail("auth.token_ttl_hours must be at least 1".to_string());
    }

    if config.auth.seed_user
        && (config.auth.seed_email.trim().is_empty() || config.auth.seed_password.is_empty())
    {
        fail("auth.seed_email and auth.seed_password must be set when auth.seed_user is true".to_string());
    }

    for (section, model, base_url) in [
        ("openai", &config.openai.model, &config.openai.base_url),
        ("gemini", &config.gemini.model, &config.gemini.base_url),
    ] {
        if model.trim().is_empty() {
            fail(format!("{section}.model must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            fail(format!(
                "{section}.base_url `{base_url}` must start with http:// or https://"
            ));
        }
    }

    if config.summary.timeout_secs == 0 {
        fail("summary.timeout_secs must be at least 1".to_string());
    }

    if config.summary.max_output_tokens == 0 {
        fail("summary.max_output_tokens must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
