//! Compact summary rendering
//!
//! A short digest of an analysis run: aggregate counts, the largest files by
//! line count and how many files were left off the list.

use crate::models::analysis::{AnalysisResult, FileRecord};

/// Files listed in the compact summary
pub const TOP_FILES: usize = 15;

/// Render the digest for `result`
pub fn render_compact_summary(result: &AnalysisResult) -> String {
    let mut output = format!(
        "Files: {} | Lines: {} | Size: {:.1} KB\nFunctions: {} | Classes: {}",
        result.file_count,
        format_thousands(result.total_lines),
        result.total_size_kb(),
        result.function_names.len(),
        result.class_names.len(),
    );

    if result.file_records.is_empty() {
        return output;
    }

    output.push_str("\n\nLargest files:\n");
    for record in largest_files(&result.file_records, TOP_FILES) {
        output.push_str(&format!(
            "- {} ({} lines{})\n",
            record.path,
            format_thousands(record.line_count),
            declaration_note(record)
        ));
    }

    let remaining = result.file_records.len().saturating_sub(TOP_FILES);
    if remaining > 0 {
        output.push_str(&format!(
            "... and {} more {}\n",
            remaining,
            plural(remaining, "file", "files")
        ));
    }

    output.trim_end().to_string()
}

/// The `limit` records with the most lines; equal counts keep traversal order
pub fn largest_files(records: &[FileRecord], limit: usize) -> Vec<&FileRecord> {
    let mut ranked: Vec<&FileRecord> = records.iter().collect();
    // sort_by is stable, which gives the tie-break for free
    ranked.sort_by(|a, b| b.line_count.cmp(&a.line_count));
    ranked.truncate(limit);
    ranked
}

fn declaration_note(record: &FileRecord) -> String {
    let mut parts = Vec::new();
    if record.function_count > 0 {
        parts.push(format!(
            "{} {}",
            record.function_count,
            plural(record.function_count, "function", "functions")
        ));
    }
    if record.class_count > 0 {
        parts.push(format!(
            "{} {}",
            record.class_count,
            plural(record.class_count, "class", "classes")
        ));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(", {}", parts.join(", "))
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// `1234567` → `"1,234,567"`
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
