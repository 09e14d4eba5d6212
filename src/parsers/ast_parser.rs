//! AST parser wrapper using OXC

use super::declarations::DeclarationCollector;
use super::{Extraction, StructuralExtractor};
use crate::error::{LazydocsError, Result};
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use std::path::Path;

/// How many parser messages end up in a single diagnostic
const MAX_REPORTED_ERRORS: usize = 3;

/// JavaScript / TypeScript extractor backed by the OXC parser.
///
/// When OXC recovers from a syntax error the declarations on either side of
/// it are still collected. When the parser gives up, nothing is extracted
/// and the file is reported as unparseable.
pub struct ScriptExtractor {
    parse_options: ParseOptions,
}

impl ScriptExtractor {
    /// Create a new script extractor
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
        }
    }
}

impl Default for ScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralExtractor for ScriptExtractor {
    fn name(&self) -> &'static str {
        "oxc"
    }

    fn handles(&self, path: &Path) -> bool {
        SourceType::from_path(path).is_ok()
    }

    fn extract(&self, path: &Path, source: &str) -> Result<Extraction> {
        let source_type = SourceType::from_path(path)
            .map_err(|_| LazydocsError::parse_fatal(path, "not a JavaScript or TypeScript file"))?;

        // The AST borrows from the allocator, so everything we need is copied
        // out before it goes away
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type)
            .with_options(self.parse_options.clone())
            .parse();

        if ret.panicked {
            return Err(LazydocsError::parse_fatal(path, describe(&ret.errors)));
        }

        let mut extraction = DeclarationCollector::collect(&ret.program);
        extraction.recovered_errors = ret.errors.iter().map(|e| e.to_string()).collect();

        tracing::debug!(
            path = %path.display(),
            functions = extraction.functions.len(),
            classes = extraction.classes.len(),
            complexity = extraction.complexity,
            "parsed script"
        );

        Ok(extraction)
    }
}

/// Condense parser diagnostics into one line
pub(crate) fn describe(errors: &[OxcDiagnostic]) -> String {
    if errors.is_empty() {
        return "parser aborted".to_string();
    }

    let mut message = errors
        .iter()
        .take(MAX_REPORTED_ERRORS)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    if errors.len() > MAX_REPORTED_ERRORS {
        message.push_str(&format!(" (+{} more)", errors.len() - MAX_REPORTED_ERRORS));
    }
    message
}
