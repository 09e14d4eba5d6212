//! lazydocs - documentation drafts from a condensed view of a source tree
//!
//! The analyzer walks a JavaScript, TypeScript or Python project, extracts
//! declaration names and a rough complexity score, and packs representative
//! code into a token-budgeted snippet. The docgen layer hands that context,
//! or git history, to a chat model and renders the reply as Markdown.

pub mod cli;
pub mod config;
pub mod core;
pub mod docgen;
pub mod error;
pub mod git;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{analyze, Analyzer};
pub use error::{ErrorSeverity, LazydocsError, Result, ResultExt};
pub use models::{
    analysis::{AnalysisResult, FileRecord},
    config::{DocConfig, DocKind},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
