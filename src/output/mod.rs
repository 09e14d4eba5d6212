//! Output formatting, reporting and writing functionality

pub mod document;
mod formatters;
mod progress;
pub mod reporter;
pub mod summary;
mod writers;

pub use self::document::{ApiEntry, ProjectStats, ReadmeDocument};
pub use self::progress::Spinner;
pub use self::reporter::{
    ConsoleReporter, FanoutReporter, LogFileReporter, MemoryReporter, Reporter,
};
pub use self::summary::render_compact_summary;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::config::OutputFormat;

/// Trait for different output formatters
pub trait Formatter {
    /// Format an analysis result into a string
    fn format(&self, results: &AnalysisResult) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, results: &AnalysisResult) -> Result<String> {
        // Quiet mode keeps only the first summary line
        if self.quiet {
            let headline = results.compact_summary.lines().next().unwrap_or_default();
            return Ok(format!("{}\n", headline));
        }

        Ok(formatters::format_results_text(
            results,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, results: &AnalysisResult) -> Result<String> {
        formatters::format_results_json(results)
    }
}

/// CSV formatter, one row per analyzed file
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, results: &AnalysisResult) -> Result<String> {
        formatters::format_results_csv(results)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
