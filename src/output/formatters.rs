//! Output formatting functionality
//!
//! Renders an [`AnalysisResult`] for the `analyze` command.

use crate::error::{LazydocsError, Result};
use crate::models::analysis::AnalysisResult;
use crate::output::summary::{format_thousands, render_compact_summary};
use ansi_term::Colour::Blue;
use ansi_term::Style;

/// Format an analysis result as text
pub fn format_results_text(results: &AnalysisResult, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Project Structure")));
    } else {
        output.push_str("Project Structure\n\n");
    }

    if results.compact_summary.is_empty() {
        output.push_str(&render_compact_summary(results));
    } else {
        output.push_str(&results.compact_summary);
    }
    output.push('\n');

    output.push_str(&format!(
        "\nAverage complexity: {:.1}\n",
        results.complexity_score
    ));

    if verbose {
        output.push_str(&format_names("Functions", &results.function_names, use_colors));
        output.push_str(&format_names("Classes", &results.class_names, use_colors));
        output.push_str(&format!(
            "\nSnippet: {} characters (~{} tokens)\n",
            format_thousands(results.combined_snippet.chars().count()),
            format_thousands(crate::core::estimate_tokens(&results.combined_snippet))
        ));
    }

    output
}

fn format_names<'a>(
    heading: &str,
    names: impl IntoIterator<Item = &'a String>,
    use_colors: bool,
) -> String {
    let names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    if names.is_empty() {
        return String::new();
    }

    let heading = if use_colors {
        Style::new().bold().paint(heading).to_string()
    } else {
        heading.to_string()
    };
    format!("\n{} ({}):\n  {}\n", heading, names.len(), names.join(", "))
}

/// Format an analysis result as JSON
pub fn format_results_json(results: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(|e| LazydocsError::JsonSerialize { source: e })
}

/// Format the per-file records as CSV
pub fn format_results_csv(results: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["Path", "Lines", "Size (bytes)", "Functions", "Classes"])?;

    for record in &results.file_records {
        writer.write_record([
            record.path.as_str(),
            &record.line_count.to_string(),
            &record.byte_size.to_string(),
            &record.function_count.to_string(),
            &record.class_count.to_string(),
        ])?;
    }

    writer.write_record([
        "TOTAL",
        &results.total_lines.to_string(),
        &results.total_size_bytes.to_string(),
        &results.function_names.len().to_string(),
        &results.class_names.len().to_string(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| LazydocsError::io_error(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
