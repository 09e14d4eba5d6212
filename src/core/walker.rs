//! Directory walking functionality
//!
//! Lazily enumerates the source files under a root, pruning excluded
//! directories before they are entered and admitting files by extension.

use crate::error::LazydocsError;
use crate::models::config::ExclusionSet;
use crate::output::reporter::Reporter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walker over the admitted source files of a directory tree
pub struct SourceWalker<'a> {
    exclusions: &'a ExclusionSet,
}

impl<'a> SourceWalker<'a> {
    /// Create a new walker with the given exclusions
    pub fn new(exclusions: &'a ExclusionSet) -> Self {
        Self { exclusions }
    }

    /// Iterate admitted files below `root` in filesystem order.
    ///
    /// A missing root yields nothing and reports `PathNotFound`. Entries that
    /// vanish or cannot be listed mid-walk are reported and skipped.
    pub fn walk(
        &self,
        root: &Path,
        reporter: &'a dyn Reporter,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        if !root.exists() {
            reporter.warn_err(&LazydocsError::PathNotFound {
                path: root.to_path_buf(),
            });
            return Box::new(std::iter::empty());
        }

        let exclusions = self.exclusions;
        let files = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            // The root itself is always entered, even if its name is excluded
            .filter_entry(move |entry| entry.depth() == 0 || !is_excluded_dir(entry, exclusions))
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    report_walk_error(err, reporter);
                    None
                }
            })
            .filter(move |entry| is_source_file(entry) && exclusions.admits(entry.path()))
            .map(DirEntry::into_path);

        Box::new(files)
    }
}

fn is_excluded_dir(entry: &DirEntry, exclusions: &ExclusionSet) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| exclusions.is_excluded_dir(name))
            .unwrap_or(false)
}

fn is_source_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn report_walk_error(err: walkdir::Error, reporter: &dyn Reporter) {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let wrapped = match err.into_io_error() {
        Some(io) if io.kind() == ErrorKind::NotFound => LazydocsError::PathNotFound { path },
        Some(io) => LazydocsError::UnreadableFile { path, source: io },
        // Only symlink loops carry no IO error, and links are not followed
        None => return,
    };
    reporter.warn_err(&wrapped);
}
