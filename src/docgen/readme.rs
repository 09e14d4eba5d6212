//! README generation

use super::{ChatClient, DocGenerator};
use crate::config::{load_project_settings, package_name};
use crate::core::{budget::truncate_chars, Analyzer};
use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::config::DocKind;
use crate::output::document::{ProjectStats, ReadmeDocument, DEFAULT_PROJECT_NAME};
use crate::output::reporter::Reporter;
use std::path::Path;

/// Snippet characters sent along with the compact summary
pub const README_SNIPPET_CHARS: usize = 4000;

pub const USAGE_INSTRUCTION: &str =
    "Generate practical usage examples with code snippets showing how to use this project";

/// A rendered README and the analysis it was built from
#[derive(Debug)]
pub struct ReadmeOutcome {
    pub analysis: AnalysisResult,
    pub markdown: String,
}

/// Prompt context: the compact summary followed by the head of the snippet
pub fn readme_context(analysis: &AnalysisResult) -> String {
    if analysis.compact_summary.is_empty() {
        return analysis.combined_snippet.clone();
    }
    format!(
        "{}\n\nCode samples:\n{}",
        analysis.compact_summary,
        truncate_chars(&analysis.combined_snippet, README_SNIPPET_CHARS)
    )
}

/// Analyze `input_dir` and write a README for it
pub fn generate_readme<C: ChatClient>(
    generator: &DocGenerator<'_, C>,
    input_dir: &Path,
    context_tokens: usize,
    reporter: &dyn Reporter,
) -> Result<ReadmeOutcome> {
    let project = load_project_settings(input_dir, reporter);

    reporter.info("Analyzing codebase...");
    let analysis = Analyzer::new(reporter)
        .with_exclusions(project.exclusion_set())
        .with_token_budget(context_tokens)
        .analyze(input_dir);

    reporter.info(&format!(
        "Found {} files, {} lines. Functions: {}, Classes: {}",
        analysis.file_count,
        analysis.total_lines,
        analysis.function_names.len(),
        analysis.class_names.len()
    ));

    let context = readme_context(&analysis);
    reporter.info("Generating documentation...");
    let overview = generator.generate_section(&context, DocKind::Readme, None)?;
    let usage = generator.generate_section(&context, DocKind::Readme, Some(USAGE_INSTRUCTION))?;

    let project_name = project
        .project_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| package_name(input_dir))
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    let document = ReadmeDocument {
        project_name,
        description: project.description.clone(),
        overview,
        usage,
        apis: ReadmeDocument::api_entries(&analysis),
        stats: ProjectStats::from(&analysis),
    };

    Ok(ReadmeOutcome {
        markdown: document.render(),
        analysis,
    })
}
