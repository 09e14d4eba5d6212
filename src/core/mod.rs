//! Core functionality for directory walking and source analysis

pub mod aggregate;
pub mod analyzer;
pub mod budget;
pub mod walker;

pub use aggregate::Aggregator;
pub use analyzer::Analyzer;
pub use budget::{estimate_tokens, SnippetBudget};
pub use walker::SourceWalker;

use crate::models::analysis::AnalysisResult;
use crate::output::reporter::ConsoleReporter;
use std::path::Path;

/// Analyze `root` with the default exclusions and extractors, sending
/// diagnostics to stderr
pub fn analyze(root: impl AsRef<Path>, max_token_budget: usize) -> AnalysisResult {
    let reporter = ConsoleReporter::default();
    Analyzer::new(&reporter)
        .with_token_budget(max_token_budget)
        .analyze(root.as_ref())
}
