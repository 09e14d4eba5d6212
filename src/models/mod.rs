//! Data models and structures for lazydocs

pub mod analysis;
pub mod config;

pub use analysis::{AnalysisResult, FileRecord};
pub use config::{
    ConfigKey, DocConfig, DocKind, ExclusionSet, OutputFormat, ProjectSettings, RawConfig,
};
