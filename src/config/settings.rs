//! Configuration value validation
//!
//! Every key has one parser. `config set` runs it before anything is written,
//! and [`SettingsValidator::to_doc_config`] runs it again over the merged
//! values, so a store edited by hand is caught too.

use crate::error::{LazydocsError, Result};
use crate::models::config::{
    ConfigKey, DocConfig, RawConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_MS,
};

pub const API_KEY_PREFIX: &str = "gsk_";
pub const MIN_API_KEY_LEN: usize = 21;
pub const MAX_TOKENS_RANGE: (u32, u32) = (100, 131_072);
pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);
pub const TIMEOUT_RANGE_MS: (u64, u64) = (1_000, 300_000);

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Check one value the way `config set` does
    pub fn validate_value(key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::GroqApiKey => Self::parse_api_key(value).map(|_| ()),
            ConfigKey::DefaultModel => Ok(()),
            ConfigKey::MaxTokens => Self::parse_max_tokens(value).map(|_| ()),
            ConfigKey::Temperature => Self::parse_temperature(value).map(|_| ()),
            ConfigKey::Timeout => Self::parse_timeout(value).map(|_| ()),
        }
    }

    /// Validate merged values, filling gaps with defaults.
    ///
    /// A missing API key is not an error here; commands that call the model
    /// ask for it through [`super::require_api_key`].
    pub fn to_doc_config(raw: &RawConfig) -> Result<DocConfig> {
        let api_key = match non_empty(raw.get(ConfigKey::GroqApiKey)) {
            Some(key) => Some(Self::parse_api_key(key)?),
            None => None,
        };

        Ok(DocConfig {
            api_key,
            model: non_empty(raw.get(ConfigKey::DefaultModel))
                .unwrap_or(DEFAULT_MODEL)
                .to_string(),
            max_tokens: match non_empty(raw.get(ConfigKey::MaxTokens)) {
                Some(value) => Self::parse_max_tokens(value)?,
                None => DEFAULT_MAX_TOKENS,
            },
            temperature: match non_empty(raw.get(ConfigKey::Temperature)) {
                Some(value) => Self::parse_temperature(value)?,
                None => DEFAULT_TEMPERATURE,
            },
            timeout_ms: match non_empty(raw.get(ConfigKey::Timeout)) {
                Some(value) => Self::parse_timeout(value)?,
                None => DEFAULT_TIMEOUT_MS,
            },
        })
    }

    fn parse_api_key(value: &str) -> Result<String> {
        let key = ConfigKey::GroqApiKey;
        check(key, value.starts_with(API_KEY_PREFIX), "Must start with \"gsk_\"")?;
        check(key, value.len() >= MIN_API_KEY_LEN, "Invalid API key format")?;
        Ok(value.to_string())
    }

    fn parse_max_tokens(value: &str) -> Result<u32> {
        let key = ConfigKey::MaxTokens;
        check(key, is_integer(value), "Must be an integer")?;
        let parsed: u32 = value
            .parse()
            .map_err(|_| invalid(key, "Must be at most 131072"))?;
        check(key, parsed >= MAX_TOKENS_RANGE.0, "Must be at least 100")?;
        check(key, parsed <= MAX_TOKENS_RANGE.1, "Must be at most 131072")?;
        Ok(parsed)
    }

    fn parse_temperature(value: &str) -> Result<f32> {
        let key = ConfigKey::Temperature;
        check(
            key,
            !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '.'),
            "Must be a number",
        )?;
        let parsed: f32 = value.parse().map_err(|_| invalid(key, "Must be a number"))?;
        check(key, parsed >= TEMPERATURE_RANGE.0, "Must be at least 0")?;
        check(key, parsed <= TEMPERATURE_RANGE.1, "Must be at most 2")?;
        Ok(parsed)
    }

    fn parse_timeout(value: &str) -> Result<u64> {
        let key = ConfigKey::Timeout;
        check(key, is_integer(value), "Must be an integer")?;
        let parsed: u64 = value
            .parse()
            .map_err(|_| invalid(key, "Must be at most 300000ms (5 minutes)"))?;
        check(key, parsed >= TIMEOUT_RANGE_MS.0, "Must be at least 1000ms (1 second)")?;
        check(key, parsed <= TIMEOUT_RANGE_MS.1, "Must be at most 300000ms (5 minutes)")?;
        Ok(parsed)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_integer(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn check(key: ConfigKey, condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(invalid(key, message))
    }
}

fn invalid(key: ConfigKey, message: &str) -> LazydocsError {
    LazydocsError::config_error(format!("Invalid config property {}: {}", key, message))
}
