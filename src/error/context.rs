//! Error context utilities
//!
//! Helpers that attach a path to raw IO failures so callers can report
//! them against the file they concern.

use crate::error::{LazydocsError, Result};
use std::path::Path;

/// Extension trait for IO results to add path context to errors
pub trait ResultExt<T> {
    /// Treat the failure as an unreadable source file
    fn unreadable<P: AsRef<Path>>(self, path: P) -> Result<T>;

    /// Treat the failure as a failed write of an output file
    fn output_write<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn unreadable<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|source| LazydocsError::UnreadableFile {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    fn output_write<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|source| LazydocsError::OutputWrite {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
