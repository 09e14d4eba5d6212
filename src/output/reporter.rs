//! Diagnostic reporting
//!
//! The analyzer never prints or writes log files on its own. Everything it
//! has to say goes through a [`Reporter`] handed in by the caller, so the CLI
//! can fan out to the console and a log file while tests simply capture the
//! messages in memory.

use crate::error::{ErrorSeverity, LazydocsError};
use ansi_term::Colour::{Blue, Red, Yellow};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sink for warnings and progress notes emitted while analyzing or generating
pub trait Reporter {
    /// Record a message at the given severity
    fn report(&self, severity: ErrorSeverity, message: &str);

    /// Informational note, ignored by sinks that only keep problems
    fn info(&self, _message: &str) {}

    /// Record an error using its user-facing message
    fn warn_err(&self, err: &LazydocsError) {
        self.report(err.severity(), &err.user_message());
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, severity: ErrorSeverity, message: &str) {
        (**self).report(severity, message)
    }

    fn info(&self, message: &str) {
        (**self).info(message)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, severity: ErrorSeverity, message: &str) {
        (**self).report(severity, message)
    }

    fn info(&self, message: &str) {
        (**self).info(message)
    }
}

/// Writes diagnostics to stderr, optionally colored
pub struct ConsoleReporter {
    use_colors: bool,
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self { use_colors, quiet }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, severity: ErrorSeverity, message: &str) {
        let label = match severity {
            ErrorSeverity::Warning => "Warning",
            ErrorSeverity::Error => "Error",
            ErrorSeverity::Critical => "Critical Error",
        };

        if self.use_colors {
            let colour = match severity {
                ErrorSeverity::Warning => Yellow,
                _ => Red,
            };
            eprintln!("{}: {}", colour.bold().paint(label), message);
        } else {
            eprintln!("{}: {}", label, message);
        }
    }

    fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_colors {
            eprintln!("{} {}", Blue.paint("›"), message);
        } else {
            eprintln!("{}", message);
        }
    }
}

/// Appends one timestamped line per diagnostic to a log file
pub struct LogFileReporter {
    path: PathBuf,
}

impl LogFileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/lazydocs/error.log`, when the platform has one
    pub fn default_location() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join("lazydocs").join("error.log")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl Reporter for LogFileReporter {
    fn report(&self, severity: ErrorSeverity, message: &str) {
        let line = format!(
            "[{}] {}: {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            severity,
            message
        );
        // Losing a log line must never take the run down with it
        if let Err(err) = self.append(&line) {
            tracing::debug!(path = %self.path.display(), error = %err, "could not append to log file");
        }
    }
}

/// One captured diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: ErrorSeverity,
    pub message: String,
}

/// Keeps every diagnostic in memory
#[derive(Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.severity == ErrorSeverity::Warning)
            .map(|d| d.message.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, severity: ErrorSeverity, message: &str) {
        self.entries.lock().push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}

/// Forwards every diagnostic to each wrapped reporter in order
#[derive(Default)]
pub struct FanoutReporter {
    sinks: Vec<Box<dyn Reporter>>,
}

impl FanoutReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl Reporter + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl Reporter for FanoutReporter {
    fn report(&self, severity: ErrorSeverity, message: &str) {
        for sink in &self.sinks {
            sink.report(severity, message);
        }
    }

    fn info(&self, message: &str) {
        for sink in &self.sinks {
            sink.info(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_memory_reporter_captures_errors() {
        let reporter = MemoryReporter::new();
        reporter.warn_err(&LazydocsError::PathNotFound {
            path: PathBuf::from("/missing"),
        });
        reporter.report(ErrorSeverity::Error, "boom");

        let entries = reporter.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, ErrorSeverity::Warning);
        assert!(entries[0].message.contains("/missing"));
        assert_eq!(reporter.warnings().len(), 1);
    }

    #[test]
    fn test_log_file_lines_are_timestamped() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("logs").join("error.log");
        let reporter = LogFileReporter::new(&log_path);

        reporter.report(ErrorSeverity::Warning, "first");
        reporter.report(ErrorSeverity::Error, "second");

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] WARNING: first"));
        assert!(lines[1].ends_with("] ERROR: second"));

        let stamp = &lines[0][1..lines[0].find(']').unwrap()];
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("fanout.log");
        let fanout = FanoutReporter::new()
            .with(LogFileReporter::new(&log_path))
            .with(LogFileReporter::new(&log_path));

        fanout.report(ErrorSeverity::Warning, "twice");

        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
