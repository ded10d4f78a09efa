// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pickup.toml` > `~/.config/pickup/pickup.toml` > `/etc/pickup/pickup.toml`
//! with environment variable overrides via `PICKUP_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PickupConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pickup/pickup.toml` (system-wide)
/// 3. `~/.config/pickup/pickup.toml` (user XDG config)
/// 4. `./pickup.toml` (local directory)
/// 5. `PICKUP_*` environment variables
pub fn load_config() -> Result<PickupConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PickupConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PickupConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PickupConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PickupConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PickupConfig::default()))
        .merge(Toml::file("/etc/pickup/pickup.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pickup/pickup.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pickup.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PICKUP_AUTH_JWT_SECRET` must map to `auth.jwt_secret`, not
/// `auth.jwt.secret`.
fn env_provider() -> Env {
    Env::prefixed("PICKUP_").map(|key| {
        // `key` keeps the env var's case once the prefix is stripped.
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("summary_", "summary.", 1);
        mapped.into()
    })
}
