//! Pull request descriptions from uncommitted changes

use super::{ChatClient, DocGenerator};
use crate::core::budget::truncate_chars;
use crate::error::Result;
use crate::git::{self, DiffSummary};
use crate::models::config::DocKind;
use crate::output::reporter::Reporter;
use std::path::Path;

/// Diff characters included in the prompt
pub const DIFF_PREVIEW_CHARS: usize = 5000;

const TRUNCATION_NOTE: &str = "\n\n... (diff truncated for brevity)";

/// Counts block and per-file list
pub fn change_summary(diff: &DiffSummary) -> String {
    let files = diff
        .files
        .iter()
        .map(|f| format!("- {} (+{}/-{})", f.path, f.insertions, f.deletions))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Files changed: {}\nInsertions: {}\nDeletions: {}\n\nChanged files:\n{}",
        diff.files.len(),
        diff.insertions,
        diff.deletions,
        files
    )
}

/// The diff, cut at [`DIFF_PREVIEW_CHARS`] with a note when it was longer
pub fn diff_preview(diff_text: &str) -> String {
    let preview = truncate_chars(diff_text, DIFF_PREVIEW_CHARS);
    if preview.len() < diff_text.len() {
        format!("{}{}", preview, TRUNCATION_NOTE)
    } else {
        diff_text.to_string()
    }
}

pub fn pr_context(diff: &DiffSummary, diff_text: &str) -> String {
    format!(
        "{}\n\nDiff preview:\n{}",
        change_summary(diff),
        diff_preview(diff_text)
    )
}

/// Describe the uncommitted changes in the repository at `input_dir`
pub fn generate_pr_description<C: ChatClient>(
    generator: &DocGenerator<'_, C>,
    input_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<String> {
    reporter.info("Analyzing git changes...");
    git::ensure_repository(input_dir)?;

    let diff = git::diff_summary(input_dir)?;
    let diff_text = git::diff_text(input_dir)?;
    reporter.info(&format!(
        "{} files changed ({} insertions, {} deletions)",
        diff.files.len(),
        diff.insertions,
        diff.deletions
    ));

    reporter.info("Generating PR description...");
    generator.generate_section(&pr_context(&diff, &diff_text), DocKind::Pr, None)
}
