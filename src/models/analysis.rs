//! Analysis result data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Statistics for one analyzed source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path relative to the analysis root, `/`-separated
    pub path: String,
    /// Number of `\n`-delimited segments in the file text
    pub line_count: usize,
    /// Size on disk in bytes
    pub byte_size: u64,
    pub function_count: usize,
    pub class_count: usize,
}

/// Everything one analysis run produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub function_names: BTreeSet<String>,
    pub class_names: BTreeSet<String>,
    pub file_count: usize,
    pub total_lines: usize,
    pub total_size_bytes: u64,
    /// Mean of the per-file complexity scores that could be computed
    pub complexity_score: f64,
    /// In traversal order
    pub file_records: Vec<FileRecord>,
    pub combined_snippet: String,
    pub compact_summary: String,
}

impl AnalysisResult {
    /// Total size in kilobytes
    pub fn total_size_kb(&self) -> f64 {
        self.total_size_bytes as f64 / 1024.0
    }

    /// True when no file was admitted
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Function names followed by class names, capped at `limit`
    pub fn top_declarations(&self, limit: usize) -> Vec<&str> {
        self.function_names
            .iter()
            .chain(self.class_names.iter())
            .map(String::as_str)
            .take(limit)
            .collect()
    }
}
