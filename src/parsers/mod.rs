//! Structural extraction from source files
//!
//! Each supported language family gets one [`StructuralExtractor`]. The
//! analyzer asks the [`ExtractorRegistry`] for the extractor that handles a
//! path and never branches on language itself.

pub mod ast_parser;
pub mod declarations;
pub mod python;

pub use ast_parser::ScriptExtractor;
pub use declarations::DeclarationCollector;
pub use python::PythonExtractor;

use crate::error::Result;
use std::path::Path;

/// Declarations and complexity found in one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Function names in source order, `"anonymous"` for unnamed ones
    pub functions: Vec<String>,
    /// Class names in source order, `"anonymous"` for unnamed ones
    pub classes: Vec<String>,
    pub complexity: u32,
    /// Syntax errors the parser recovered from
    pub recovered_errors: Vec<String>,
}

/// Pulls top-level declarations out of a single source file
pub trait StructuralExtractor {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this extractor understands the file
    fn handles(&self, path: &Path) -> bool;

    /// Extract declarations from `path`, whose text is `source`
    fn extract(&self, path: &Path, source: &str) -> Result<Extraction>;
}

/// Ordered collection of extractors; the first that handles a path wins
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn StructuralExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// In-process JS/TS parsing plus the Python delegate
    pub fn standard() -> Self {
        Self::new()
            .with(ScriptExtractor::new())
            .with(PythonExtractor::new())
    }

    pub fn with(mut self, extractor: impl StructuralExtractor + 'static) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    pub fn find(&self, path: &Path) -> Option<&dyn StructuralExtractor> {
        self.extractors
            .iter()
            .find(|extractor| extractor.handles(path))
            .map(|extractor| extractor.as_ref())
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
