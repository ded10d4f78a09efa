// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider credential resolution from config and the process environment.

use pickup_config::PickupConfig;
use pickup_core::CredentialSource;
use secrecy::SecretString;

/// Environment variable consulted for the OpenAI key when config has none.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable consulted for the Gemini key when config has none.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Resolves provider keys: a non-blank config value wins, otherwise the
/// provider's environment variable is read at call time.
///
/// Nothing is cached, so rotating `OPENAI_API_KEY` takes effect on the next
/// request.
pub struct ConfigCredentials {
    openai: Option<String>,
    gemini: Option<String>,
}

impl ConfigCredentials {
    pub fn new(config: &PickupConfig) -> Self {
        Self {
            openai: config.openai.api_key.clone(),
            gemini: config.gemini.api_key.clone(),
        }
    }
}

impl std::fmt::Debug for ConfigCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigCredentials")
            .field("openai", &self.openai.as_ref().map(|_| "[redacted]"))
            .field("gemini", &self.gemini.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl CredentialSource for ConfigCredentials {
    fn credential(&self, provider: &str) -> Option<SecretString> {
        let (configured, env_var) = match provider {
            "openai" => (self.openai.as_deref(), OPENAI_API_KEY_ENV),
            "gemini" => (self.gemini.as_deref(), GEMINI_API_KEY_ENV),
            _ => return None,
        };

        configured
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .or_else(|| std::env::var(env_var).ok().filter(|k| !k.trim().is_empty()))
            .map(SecretString::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var(OPENAI_API_KEY_ENV);
            std::env::remove_var(GEMINI_API_KEY_ENV);
        }
    }

    fn exposed(creds: &ConfigCredentials, provider: &str) -> Option<String> {
        creds
            .credential(provider)
            .map(|s| s.expose_secret().to_string())
    }

    #[test]
    #[serial]
    fn config_value_takes_priority_over_env() {
        clear_env();
        unsafe { std::env::set_var(OPENAI_API_KEY_ENV, "from-env") };

        let mut config = PickupConfig::default();
        config.openai.api_key = Some("from-config".into());
        let creds = ConfigCredentials::new(&config);

        assert_eq!(exposed(&creds, "openai").as_deref(), Some("from-config"));
        clear_env();
    }

    #[test]
    #[serial]
    fn env_is_read_at_call_time() {
        clear_env();
        let creds = ConfigCredentials::new(&PickupConfig::default());
        assert!(creds.credential("gemini").is_none());

        unsafe { std::env::set_var(GEMINI_API_KEY_ENV, "rotated") };
        assert_eq!(exposed(&creds, "gemini").as_deref(), Some("rotated"));

        unsafe { std::env::remove_var(GEMINI_API_KEY_ENV) };
        assert!(creds.credential("gemini").is_none());
    }

    #[test]
    #[serial]
    fn blank_values_count_as_unset() {
        clear_env();
        unsafe { std::env::set_var(OPENAI_API_KEY_ENV, "   ") };

        let mut config = PickupConfig::default();
        config.openai.api_key = Some(String::new());
        let creds = ConfigCredentials::new(&config);

        assert!(creds.credential("openai").is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn unknown_provider_has_no_credential() {
        clear_env();
        let creds = ConfigCredentials::new(&PickupConfig::default());
        assert!(creds.credential("anthropic").is_none());
    }

    #[test]
    fn debug_redacts_keys() {
        let mut config = PickupConfig::default();
        config.gemini.api_key = Some("AIza-secret".into());
        let creds = ConfigCredentials::new(&config);
        assert!(!format!("{creds:?}").contains("AIza-secret"));
    }
}
