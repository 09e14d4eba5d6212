//! Configuration-related data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Directory basenames that are never traversed
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
];

/// Extensions admitted by default; `.py` is handled by the external delegate
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs", ".py"];

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Token budget for the combined code snippet
pub const DEFAULT_CONTEXT_TOKENS: usize = 6000;

/// Which directories to skip and which files to admit during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    excluded_dirs: BTreeSet<String>,
    extensions: BTreeSet<String>,
}

impl ExclusionSet {
    /// Build a set from directory basenames and extensions.
    ///
    /// Extensions are matched including their leading dot; entries given
    /// without one (`"ts"`) are normalized to `".ts"`.
    pub fn new<D, E>(excluded_dirs: D, extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            excluded_dirs: excluded_dirs.into_iter().map(Into::into).collect(),
            extensions: extensions
                .into_iter()
                .map(|ext| {
                    let ext: String = ext.into();
                    if ext.starts_with('.') {
                        ext
                    } else {
                        format!(".{}", ext)
                    }
                })
                .collect(),
        }
    }

    /// Replace the admitted extensions, keeping the directory exclusions
    pub fn with_extensions<E>(self, extensions: E) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self::new(self.excluded_dirs, extensions)
    }

    /// Replace the excluded directory names, keeping the extensions
    pub fn with_excluded_dirs<D>(self, excluded_dirs: D) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self::new(excluded_dirs, self.extensions)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Case-sensitive match of the file's dotted extension
    pub fn admits(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.extensions.contains(&format!(".{}", ext)),
            None => false,
        }
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn excluded_dirs(&self) -> impl Iterator<Item = &str> {
        self.excluded_dirs.iter().map(String::as_str)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_DIRS.iter().copied(),
            DEFAULT_EXTENSIONS.iter().copied(),
        )
    }
}

/// Project-level `.lazydocs.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Overrides the admitted file extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    /// Overrides the excluded directory names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_dirs: Option<Vec<String>>,
}

impl ProjectSettings {
    /// The exclusion set these settings describe, defaults filling the gaps
    pub fn exclusion_set(&self) -> ExclusionSet {
        let mut set = ExclusionSet::default();
        if let Some(extensions) = &self.extensions {
            set = set.with_extensions(extensions.iter().cloned());
        }
        if let Some(dirs) = &self.exclude_dirs {
            set = set.with_excluded_dirs(dirs.iter().cloned());
        }
        set
    }
}

/// Keys accepted by the user configuration store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    GroqApiKey,
    DefaultModel,
    MaxTokens,
    Temperature,
    Timeout,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::GroqApiKey,
        ConfigKey::DefaultModel,
        ConfigKey::MaxTokens,
        ConfigKey::Temperature,
        ConfigKey::Timeout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::GroqApiKey => "GROQ_API_KEY",
            ConfigKey::DefaultModel => "DEFAULT_MODEL",
            ConfigKey::MaxTokens => "MAX_TOKENS",
            ConfigKey::Temperature => "TEMPERATURE",
            ConfigKey::Timeout => "TIMEOUT",
        }
    }

    /// Environment variable consulted for this key
    pub fn env_var(&self, prefix: &str) -> String {
        match self {
            ConfigKey::GroqApiKey => "GROQ_API_KEY".to_string(),
            other => format!("{}_{}", prefix, other.as_str()),
        }
    }

    /// Whether listing should hide the value
    pub fn is_secret(&self) -> bool {
        self.as_str().contains("KEY")
    }
}

impl std::str::FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Invalid config property: {}", s))
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated configuration values from one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    pub api_key: Option<String>,
    pub default_model: Option<String>,
    pub max_tokens: Option<String>,
    pub temperature: Option<String>,
    pub timeout: Option<String>,
}

impl RawConfig {
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::GroqApiKey => self.api_key.as_deref(),
            ConfigKey::DefaultModel => self.default_model.as_deref(),
            ConfigKey::MaxTokens => self.max_tokens.as_deref(),
            ConfigKey::Temperature => self.temperature.as_deref(),
            ConfigKey::Timeout => self.timeout.as_deref(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            ConfigKey::GroqApiKey => self.api_key = value,
            ConfigKey::DefaultModel => self.default_model = value,
            ConfigKey::MaxTokens => self.max_tokens = value,
            ConfigKey::Temperature => self.temperature = value,
            ConfigKey::Timeout => self.timeout = value,
        }
    }

    /// Merge another RawConfig into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: RawConfig) {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.default_model.is_some() {
            self.default_model = other.default_model;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
    }
}

/// Validated settings for the documentation commands
#[derive(Debug, Clone, PartialEq)]
pub struct DocConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Supported output formats for `analyze`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// The compact summary
    #[default]
    Text,
    /// The whole analysis result
    Json,
    /// One row per analyzed file
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Kinds of document the generator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Readme,
    Pr,
    Changelog,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Readme => "readme",
            DocKind::Pr => "pr",
            DocKind::Changelog => "changelog",
        }
    }

    /// File written when no output path is given
    pub fn default_output(&self) -> &'static str {
        match self {
            DocKind::Readme => "README.md",
            DocKind::Pr => "PR_DESCRIPTION.md",
            DocKind::Changelog => "CHANGELOG.md",
        }
    }
}

impl std::str::FromStr for DocKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "readme" => Ok(DocKind::Readme),
            "pr" => Ok(DocKind::Pr),
            "changelog" => Ok(DocKind::Changelog),
            _ => Err(format!("Invalid doc type: {}. Use readme, pr, or changelog.", s)),
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
