//! Configuration management
//!
//! Values are layered: command line over environment over the user store
//! over built-in defaults. Validation happens once, on the merged result.

pub mod file;
pub mod parser;
pub mod settings;

use crate::error::{LazydocsError, Result};
use crate::models::config::{DocConfig, RawConfig};

pub use file::{ConfigStore, EnvConfig, DEFAULT_STORE_FILE, ENV_PREFIX};
pub use parser::{load_project_settings, package_name, save_project_settings, PROJECT_FILE};
pub use settings::SettingsValidator;

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<RawConfig>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;
}

/// Configuration builder for merging multiple sources
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    raw: RawConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge values; the ones given here win
    pub fn merge(mut self, raw: RawConfig) -> Self {
        self.raw.merge_from(raw);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }
        tracing::debug!(source = source.name(), "merging configuration source");
        Ok(self.merge(source.load()?))
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<DocConfig> {
        SettingsValidator::to_doc_config(&self.raw)
    }
}

/// Resolve settings from the store, the environment and command-line values
pub fn load_config(store: &ConfigStore, env: &EnvConfig, cli: RawConfig) -> Result<DocConfig> {
    ConfigBuilder::new()
        .load_from(store)?
        .load_from(env)?
        .merge(cli)
        .build()
}

/// The API key, or the error telling the user how to set one
pub fn require_api_key(config: &DocConfig) -> Result<&str> {
    config.api_key.as_deref().ok_or(LazydocsError::MissingApiKey)
}
