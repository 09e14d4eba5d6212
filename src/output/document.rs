//! Markdown rendering for generated README files

use crate::models::analysis::AnalysisResult;
use crate::output::summary::format_thousands;
use std::fmt::Write;

/// Declarations listed in the API section
pub const API_ENTRIES: usize = 8;

/// Fallback title when the project has no name on record
pub const DEFAULT_PROJECT_NAME: &str = "Your Project";

/// One entry of the API section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEntry {
    pub name: String,
    pub description: String,
}

impl ApiEntry {
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{} - Core functionality (see code for details)", name),
        }
    }
}

/// Figures shown in the statistics block
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectStats {
    pub file_count: usize,
    pub total_lines: usize,
    pub functions: usize,
    pub classes: usize,
    pub size_kb: f64,
    pub complexity: f64,
}

impl From<&AnalysisResult> for ProjectStats {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            file_count: result.file_count,
            total_lines: result.total_lines,
            functions: result.function_names.len(),
            classes: result.class_names.len(),
            size_kb: result.total_size_kb(),
            complexity: result.complexity_score,
        }
    }
}

/// A README assembled from generated sections and analysis figures
#[derive(Debug, Clone)]
pub struct ReadmeDocument {
    pub project_name: String,
    pub description: Option<String>,
    pub overview: String,
    pub usage: String,
    pub apis: Vec<ApiEntry>,
    pub stats: ProjectStats,
}

impl ReadmeDocument {
    /// API entries for the first declarations of `result`
    pub fn api_entries(result: &AnalysisResult) -> Vec<ApiEntry> {
        result
            .top_declarations(API_ENTRIES)
            .into_iter()
            .map(ApiEntry::placeholder)
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "# {}\n", self.project_name);
        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = writeln!(out, "> {}\n", description.trim());
        }

        let _ = writeln!(out, "## Overview\n\n{}\n", self.overview.trim());
        let _ = writeln!(out, "## Usage\n\n{}\n", self.usage.trim());

        if !self.apis.is_empty() {
            let _ = writeln!(out, "## API\n");
            for api in &self.apis {
                let _ = writeln!(out, "- **{}**: {}", api.name, api.description);
            }
            out.push('\n');
        }

        let stats = &self.stats;
        let _ = writeln!(out, "## Project Statistics\n");
        let _ = writeln!(out, "| Metric | Value |");
        let _ = writeln!(out, "| --- | --- |");
        let _ = writeln!(out, "| Files | {} |", format_thousands(stats.file_count));
        let _ = writeln!(out, "| Lines of code | {} |", format_thousands(stats.total_lines));
        let _ = writeln!(out, "| Functions | {} |", stats.functions);
        let _ = writeln!(out, "| Classes | {} |", stats.classes);
        let _ = writeln!(out, "| Total size | {:.1} KB |", stats.size_kb);
        let _ = writeln!(out, "| Average complexity | {:.1} |", stats.complexity);

        let _ = write!(out, "\n---\n\n_Generated with lazydocs._\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        let mut result = AnalysisResult {
            file_count: 3,
            total_lines: 1500,
            total_size_bytes: 2048,
            complexity_score: 4.26,
            ..Default::default()
        };
        for name in ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"] {
            result.function_names.insert(name.to_string());
        }
        for name in ["Service", "Store"] {
            result.class_names.insert(name.to_string());
        }
        result
    }

    #[test]
    fn test_api_entries_cap_and_order() {
        let entries = ReadmeDocument::api_entries(&sample_result());
        assert_eq!(entries.len(), API_ENTRIES);
        // Functions first, in sorted order, then classes
        assert_eq!(entries[0].name, "alpha");
        assert_eq!(entries[7].name, "Service");
        assert_eq!(
            entries[0].description,
            "alpha - Core functionality (see code for details)"
        );
    }

    #[test]
    fn test_render_contains_all_sections() {
        let result = sample_result();
        let doc = ReadmeDocument {
            project_name: "demo".to_string(),
            description: Some("A small demo".to_string()),
            overview: "It does things.\n".to_string(),
            usage: "```sh\ndemo run\n```".to_string(),
            apis: ReadmeDocument::api_entries(&result),
            stats: ProjectStats::from(&result),
        };

        let rendered = doc.render();
        assert!(rendered.starts_with("# demo\n\n> A small demo\n"));
        assert!(rendered.contains("## Overview\n\nIt does things.\n"));
        assert!(rendered.contains("demo run"));
        assert!(rendered.contains("- **alpha**: alpha - Core functionality"));
        assert!(rendered.contains("| Lines of code | 1,500 |"));
        assert!(rendered.contains("| Total size | 2.0 KB |"));
        assert!(rendered.contains("| Average complexity | 4.3 |"));
    }

    #[test]
    fn test_render_without_apis_or_description() {
        let doc = ReadmeDocument {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            description: None,
            overview: "o".to_string(),
            usage: "u".to_string(),
            apis: Vec::new(),
            stats: ProjectStats::from(&AnalysisResult::default()),
        };

        let rendered = doc.render();
        assert!(rendered.starts_with("# Your Project\n\n## Overview"));
        assert!(!rendered.contains("## API"));
    }
}
