//! Source tree analysis
//!
//! Drives the walker, extractors, aggregator and snippet budget in a single
//! pass. Files are read and parsed one at a time; any failure is confined to
//! the file it concerns and reported as a warning.

use crate::core::aggregate::Aggregator;
use crate::core::budget::SnippetBudget;
use crate::core::walker::SourceWalker;
use crate::error::{LazydocsError, Result, ResultExt};
use crate::models::analysis::AnalysisResult;
use crate::models::config::{ExclusionSet, DEFAULT_CONTEXT_TOKENS};
use crate::output::reporter::Reporter;
use crate::parsers::{Extraction, ExtractorRegistry};
use std::fs;
use std::path::{Component, Path};

/// Analyzer for a source tree
pub struct Analyzer<'r> {
    exclusions: ExclusionSet,
    extractors: ExtractorRegistry,
    max_tokens: usize,
    reporter: &'r dyn Reporter,
}

impl<'r> Analyzer<'r> {
    /// Default exclusions, the standard extractors and a 6000 token budget
    pub fn new(reporter: &'r dyn Reporter) -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            extractors: ExtractorRegistry::standard(),
            max_tokens: DEFAULT_CONTEXT_TOKENS,
            reporter,
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn with_token_budget(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Analyze every admitted file below `root`.
    ///
    /// Never fails: a missing or unreadable root produces an empty result.
    pub fn analyze(&self, root: &Path) -> AnalysisResult {
        let walker = SourceWalker::new(&self.exclusions);
        let mut aggregator = Aggregator::new();
        let mut budget = SnippetBudget::new(self.max_tokens);

        for path in walker.walk(root, self.reporter) {
            let (content, byte_size) = match read_source(&path) {
                Ok(source) => source,
                Err(err) => {
                    self.reporter.warn_err(&err);
                    continue;
                }
            };

            let relative = relative_path(root, &path);
            let line_count = content.split('\n').count();
            let extraction = self.extract(&path, &content);

            budget.offer(&relative, &content);
            aggregator.record(relative, line_count, byte_size, extraction.as_ref());
        }

        if budget.skipped() > 0 {
            tracing::debug!(
                skipped = budget.skipped(),
                "files left out of the snippet by the token budget"
            );
        }

        aggregator.finish(budget.finish())
    }

    fn extract(&self, path: &Path, content: &str) -> Option<Extraction> {
        let Some(extractor) = self.extractors.find(path) else {
            tracing::debug!(path = %path.display(), "no extractor, counting stats only");
            return None;
        };

        match extractor.extract(path, content) {
            Ok(extraction) => {
                if !extraction.recovered_errors.is_empty() {
                    self.reporter.warn_err(&LazydocsError::ParseRecoverable {
                        path: path.to_path_buf(),
                        message: extraction.recovered_errors.join("; "),
                    });
                }
                Some(extraction)
            }
            Err(err) => {
                self.reporter.warn_err(&err);
                None
            }
        }
    }
}

/// File text (lossy UTF-8) and its size on disk
fn read_source(path: &Path) -> Result<(String, u64)> {
    let bytes = fs::read(path).unreadable(path)?;
    let byte_size = fs::metadata(path)
        .map(|meta| meta.len())
        .unwrap_or(bytes.len() as u64);
    Ok((String::from_utf8_lossy(&bytes).into_owned(), byte_size))
}

/// `/`-separated path of `path` below `root`; the file name when `root` is the file
pub(crate) fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        joined
    }
}
