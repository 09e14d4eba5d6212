//! Configuration sources: the user store file and environment variables

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::settings::SettingsValidator;
use super::ConfigSource;
use crate::error::{LazydocsError, Result, ResultExt};
use crate::models::config::{ConfigKey, RawConfig};
use crate::output::reporter::Reporter;

/// Store file name in the home directory
pub const DEFAULT_STORE_FILE: &str = ".lazydocs";

/// Prefix for the environment overrides other than `GROQ_API_KEY`
pub const ENV_PREFIX: &str = "LAZYDOCS";

/// The user key/value store, a flat JSON object
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl ConfigStore {
    /// `~/.lazydocs`, when a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_STORE_FILE))
    }

    /// Load the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object is
    /// reported as a warning and also treated as empty.
    pub fn load(path: impl Into<PathBuf>, reporter: &dyn Reporter) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
                Ok(values) => values,
                Err(source) => {
                    reporter.warn_err(&LazydocsError::ConfigParse {
                        path: path.clone(),
                        source,
                    });
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                reporter.warn_err(&LazydocsError::UnreadableFile {
                    path: path.clone(),
                    source: err,
                });
                BTreeMap::new()
            }
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "loaded config store");
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value rendered as text; numbers written by older versions included
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(value_to_string)
    }

    /// Validate and store `value` under `key`, then save
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key: ConfigKey = key.parse().map_err(LazydocsError::config_error)?;
        SettingsValidator::validate_value(key, value)?;

        let stored = match key {
            ConfigKey::MaxTokens | ConfigKey::Timeout => value
                .parse::<u64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(value)),
            ConfigKey::Temperature => value
                .parse::<f64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(value)),
            ConfigKey::GroqApiKey | ConfigKey::DefaultModel => Value::from(value),
        };
        self.values.insert(key.as_str().to_string(), stored);
        self.save()
    }

    /// Remove `key`, then save. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let removed = self.values.remove(key).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// All stored entries, sorted by key
    pub fn list(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value_to_string(value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content).output_write(&self.path)
    }
}

impl ConfigSource for ConfigStore {
    fn load(&self) -> Result<RawConfig> {
        let mut raw = RawConfig::default();
        for key in ConfigKey::ALL {
            if let Some(value) = self.get(key.as_str()) {
                raw.set(key, value);
            }
        }
        Ok(raw)
    }

    fn is_available(&self) -> bool {
        !self.values.is_empty()
    }

    fn name(&self) -> &str {
        "config store"
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    vars: Option<BTreeMap<String, String>>,
}

impl EnvConfig {
    /// Read from the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            vars: None,
        }
    }

    /// Read from a fixed set of variables instead of the process environment
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = Self::new(prefix);
        config.vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        config
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
        .filter(|value| !value.is_empty())
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(ENV_PREFIX)
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<RawConfig> {
        let mut raw = RawConfig::default();
        for key in ConfigKey::ALL {
            if let Some(value) = self.var(&key.env_var(&self.prefix)) {
                raw.set(key, value);
            }
        }
        Ok(raw)
    }

    fn is_available(&self) -> bool {
        ConfigKey::ALL
            .iter()
            .any(|key| self.var(&key.env_var(&self.prefix)).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
