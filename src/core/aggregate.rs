//! Folding per-file results into one analysis result

use crate::models::analysis::{AnalysisResult, FileRecord};
use crate::output::summary::render_compact_summary;
use crate::parsers::Extraction;
use std::collections::BTreeSet;

/// Running totals for one analysis run
#[derive(Debug, Default)]
pub struct Aggregator {
    function_names: BTreeSet<String>,
    class_names: BTreeSet<String>,
    file_records: Vec<FileRecord>,
    total_lines: usize,
    total_size_bytes: u64,
    complexity_sum: u64,
    complexity_count: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one readable file. `extraction` is `None` when its declarations
    /// could not be extracted; the file still counts toward size and lines.
    pub fn record(
        &mut self,
        path: impl Into<String>,
        line_count: usize,
        byte_size: u64,
        extraction: Option<&Extraction>,
    ) {
        let (function_count, class_count) = match extraction {
            Some(extraction) => {
                self.function_names.extend(extraction.functions.iter().cloned());
                self.class_names.extend(extraction.classes.iter().cloned());
                self.complexity_sum += u64::from(extraction.complexity);
                self.complexity_count += 1;
                (extraction.functions.len(), extraction.classes.len())
            }
            None => (0, 0),
        };

        self.total_lines += line_count;
        self.total_size_bytes += byte_size;
        self.file_records.push(FileRecord {
            path: path.into(),
            line_count,
            byte_size,
            function_count,
            class_count,
        });
    }

    pub fn file_count(&self) -> usize {
        self.file_records.len()
    }

    /// Mean complexity over the files that produced a score, 0 when none did
    pub fn complexity_score(&self) -> f64 {
        if self.complexity_count == 0 {
            0.0
        } else {
            self.complexity_sum as f64 / self.complexity_count as f64
        }
    }

    /// Seal the totals, attach the snippet and render the compact summary
    pub fn finish(self, combined_snippet: String) -> AnalysisResult {
        let complexity_score = self.complexity_score();
        let mut result = AnalysisResult {
            function_names: self.function_names,
            class_names: self.class_names,
            file_count: self.file_records.len(),
            total_lines: self.total_lines,
            total_size_bytes: self.total_size_bytes,
            complexity_score,
            file_records: self.file_records,
            combined_snippet,
            compact_summary: String::new(),
        };
        result.compact_summary = render_compact_summary(&result);
        result
    }
}
