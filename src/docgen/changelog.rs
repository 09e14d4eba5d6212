//! Changelog entries from recent commit subjects

use super::{ChatClient, DocGenerator};
use crate::error::{LazydocsError, Result};
use crate::git::{self, CommitLine};
use crate::models::config::DocKind;
use crate::output::reporter::Reporter;
use std::path::Path;

/// One `- <hash> <subject>` line per commit, newest first
pub fn commit_context(commits: &[CommitLine]) -> String {
    commits
        .iter()
        .map(|c| format!("- {} {}", c.short_hash, c.subject))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summarize the newest `limit` commits of the repository at `input_dir`
pub fn generate_changelog<C: ChatClient>(
    generator: &DocGenerator<'_, C>,
    input_dir: &Path,
    limit: usize,
    reporter: &dyn Reporter,
) -> Result<String> {
    reporter.info("Reading commit history...");
    git::ensure_repository(input_dir)?;

    let commits = git::recent_commits(input_dir, limit)?;
    if commits.is_empty() {
        return Err(LazydocsError::git_error(
            "No commits found. Commit some changes before generating a changelog.",
        ));
    }
    reporter.info(&format!("{} commits", commits.len()));

    reporter.info("Generating changelog...");
    generator.generate_section(&commit_context(&commits), DocKind::Changelog, None)
}
