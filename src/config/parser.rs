//! Project file parsing utilities
//!
//! `.lazydocs.json` describes the project being documented and may override
//! which files the analyzer looks at.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;

use crate::error::{LazydocsError, Result, ResultExt};
use crate::models::config::ProjectSettings;
use crate::output::reporter::Reporter;

/// Project file name, looked up in the input directory
pub const PROJECT_FILE: &str = ".lazydocs.json";

/// Location of the project file for `dir`
pub fn project_file_path(dir: &Path) -> PathBuf {
    dir.join(PROJECT_FILE)
}

/// Parse project file content
pub fn parse_project_content<P: AsRef<Path>>(content: &str, path: P) -> Result<ProjectSettings> {
    serde_json::from_str(content).map_err(|source| LazydocsError::ConfigParse {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

/// Load the project file in `dir`.
///
/// Missing means defaults. Malformed means a warning and defaults.
pub fn load_project_settings(dir: &Path, reporter: &dyn Reporter) -> ProjectSettings {
    let path = project_file_path(dir);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return ProjectSettings::default(),
    };

    match parse_project_content(&content, &path) {
        Ok(settings) => settings,
        Err(err) => {
            reporter.warn_err(&err);
            ProjectSettings::default()
        }
    }
}

/// Write `settings` as the project file in `dir`, stamping the creation time
/// if it has none
pub fn save_project_settings(dir: &Path, settings: &ProjectSettings) -> Result<PathBuf> {
    let mut settings = settings.clone();
    if settings.created_at.is_none() {
        settings.created_at = Some(Utc::now());
    }

    let path = project_file_path(dir);
    let content = serde_json::to_string_pretty(&settings)?;
    fs::write(&path, content).output_write(&path)?;
    Ok(path)
}

#[derive(Deserialize)]
struct PackageManifest {
    name: Option<String>,
}

/// `name` from `package.json` in `dir`, if there is a readable one
pub fn package_name(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(dir.join("package.json")).ok()?;
    let manifest: PackageManifest = serde_json::from_str(&content).ok()?;
    manifest.name.filter(|name| !name.trim().is_empty())
}
