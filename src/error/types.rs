//! Error types and definitions for lazydocs
//!
//! Analyzer-side failures are scoped to a single file or delegate call and are
//! reported as warnings; only the documentation commands escalate to critical
//! errors that end the process.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for lazydocs operations
#[derive(Debug, Error)]
pub enum LazydocsError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Analysis root or one of its subdirectories does not exist
    #[error("Directory not found: {path}")]
    PathNotFound { path: PathBuf },

    /// A source file could not be read
    #[error("Failed to read {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Syntax errors the parser recovered from
    #[error("Recovered from syntax errors in {path}: {message}")]
    ParseRecoverable { path: PathBuf, message: String },

    /// Parser or delegate gave up on a file
    #[error("Failed to parse {path}: {message}")]
    ParseFatal { path: PathBuf, message: String },

    /// Malformed JSON configuration file
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No API key configured for a generation command
    #[error("Please set your Groq API key via `lazydocs config set GROQ_API_KEY=<your token>`")]
    MissingApiKey,

    /// The API rejected the key
    #[error("Invalid API key. Please check your Groq API key.")]
    Unauthorized,

    /// The API throttled the request
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The prompt was too large for the endpoint
    #[error("Request payload too large for the model endpoint")]
    PayloadTooLarge,

    /// The endpoint could not be reached
    #[error("Network error: {message}")]
    Network { message: String },

    /// Any other non-success API response
    #[error("AI generation failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model answered without any content
    #[error("No content generated from AI")]
    EmptyCompletion,

    /// The input directory is not inside a git work tree
    #[error("Not a git repository: {path}. Please run this command in a git repository.")]
    NotGitRepository { path: PathBuf },

    /// A git invocation failed
    #[error("Git error: {message}")]
    Git { message: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },
}

impl LazydocsError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - analysis degrades but continues
            LazydocsError::PathNotFound { .. } => ErrorSeverity::Warning,
            LazydocsError::UnreadableFile { .. } => ErrorSeverity::Warning,
            LazydocsError::ParseRecoverable { .. } => ErrorSeverity::Warning,
            LazydocsError::ParseFatal { .. } => ErrorSeverity::Warning,
            LazydocsError::ConfigParse { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            LazydocsError::Config { .. } => ErrorSeverity::Critical,
            LazydocsError::MissingApiKey => ErrorSeverity::Critical,
            LazydocsError::Unauthorized => ErrorSeverity::Critical,
            LazydocsError::NotGitRepository { .. } => ErrorSeverity::Critical,
            LazydocsError::OutputWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Whether a chat request that failed with this error is worth repeating
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            LazydocsError::Unauthorized
                | LazydocsError::MissingApiKey
                | LazydocsError::Config { .. }
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LazydocsError::PathNotFound { path } => {
                format!("Directory not found: '{}'. Nothing to analyze there.", path.display())
            }
            LazydocsError::UnreadableFile { path, source } => {
                format!("Skipping '{}': {}", path.display(), source)
            }
            LazydocsError::ParseFatal { path, message } => {
                format!("Failed to parse '{}': {}", path.display(), message)
            }
            LazydocsError::ConfigParse { path, source } => {
                format!(
                    "Invalid JSON in '{}': {}. Using built-in defaults.",
                    path.display(),
                    source
                )
            }
            LazydocsError::PayloadTooLarge => {
                "The prompt is too large for the model. Try a smaller --context-tokens value.".to_string()
            }
            LazydocsError::OutputWrite { path, source } => {
                format!(
                    "Could not write '{}': {}. Check that the directory exists and is writable.",
                    path.display(),
                    source
                )
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        LazydocsError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        LazydocsError::Config {
            message: message.into(),
        }
    }

    /// Create a fatal parse error for one file
    pub fn parse_fatal(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LazydocsError::ParseFatal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a git error
    pub fn git_error(message: impl Into<String>) -> Self {
        LazydocsError::Git {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for LazydocsError {
    fn from(err: std::io::Error) -> Self {
        LazydocsError::io_error(err)
    }
}

impl From<csv::Error> for LazydocsError {
    fn from(err: csv::Error) -> Self {
        LazydocsError::Csv { source: err }
    }
}

impl From<serde_json::Error> for LazydocsError {
    fn from(err: serde_json::Error) -> Self {
        LazydocsError::JsonSerialize { source: err }
    }
}

/// Result type alias for lazydocs operations
pub type Result<T> = std::result::Result<T, LazydocsError>;
