//! Git access for PR descriptions and changelogs
//!
//! Shells out to the `git` binary. Every command runs with `-C <dir>` and with
//! `GIT_DIR`/`GIT_WORK_TREE` removed, so inherited environment cannot point it
//! at another repository.

use crate::error::{LazydocsError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Commits read for a changelog when no limit is given
pub const DEFAULT_COMMIT_LIMIT: usize = 50;

fn git_cmd() -> Command {
    let mut cmd = Command::new("git");
    cmd.env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
    cmd
}

pub fn git_available() -> bool {
    git_cmd()
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Top of the work tree containing `path`
pub fn repo_root(path: &Path) -> Option<PathBuf> {
    let output = git_cmd()
        .arg("-C")
        .arg(path)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// The work tree root, or `NotGitRepository`
pub fn ensure_repository(path: &Path) -> Result<PathBuf> {
    repo_root(path).ok_or_else(|| LazydocsError::NotGitRepository {
        path: path.to_path_buf(),
    })
}

fn run(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = git_cmd()
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| LazydocsError::git_error(format!("failed to run git: {}", e)))?;

    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if is_not_repository(&stderr) {
        return Err(LazydocsError::NotGitRepository {
            path: dir.to_path_buf(),
        });
    }
    Err(LazydocsError::git_error(format!(
        "git {} failed: {}",
        args.first().copied().unwrap_or_default(),
        stderr.trim()
    )))
}

/// git words this differently per subcommand, `diff` capitalizes it
fn is_not_repository(stderr: &str) -> bool {
    stderr.to_lowercase().contains("not a git repository")
}

/// Line counts for one changed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

/// Uncommitted changes in the work tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files: Vec<FileChange>,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    pub fn from_changes(files: Vec<FileChange>) -> Self {
        let insertions = files.iter().map(|f| f.insertions).sum();
        let deletions = files.iter().map(|f| f.deletions).sum();
        Self {
            files,
            insertions,
            deletions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parse `git diff --numstat` output. Binary files (`-`) count as zero lines.
pub fn parse_numstat(text: &str) -> Vec<FileChange> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '\t');
            let insertions = parts.next()?;
            let deletions = parts.next()?;
            let path = parts.next()?.trim();
            if path.is_empty() {
                return None;
            }
            Some(FileChange {
                path: path.to_string(),
                insertions: insertions.trim().parse().unwrap_or(0),
                deletions: deletions.trim().parse().unwrap_or(0),
            })
        })
        .collect()
}

/// Per-file counts of the unstaged changes below `dir`
pub fn diff_summary(dir: &Path) -> Result<DiffSummary> {
    // Outside a work tree `git diff` falls back to `--no-index` usage errors
    ensure_repository(dir)?;
    let output = run(dir, &["diff", "--numstat"])?;
    let text = String::from_utf8_lossy(&output.stdout);
    Ok(DiffSummary::from_changes(parse_numstat(&text)))
}

/// Unified diff of the unstaged changes below `dir`
pub fn diff_text(dir: &Path) -> Result<String> {
    ensure_repository(dir)?;
    let output = run(dir, &["diff"])?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLine {
    pub short_hash: String,
    pub subject: String,
}

/// Newest `limit` commits on the current branch. A branch with no commits yields none.
pub fn recent_commits(dir: &Path, limit: usize) -> Result<Vec<CommitLine>> {
    let count = format!("-n{}", limit);
    let output = match run(dir, &["log", &count, "--pretty=format:%h|%s"]) {
        Ok(output) => output,
        Err(LazydocsError::Git { message }) if message.contains("does not have any commits") => {
            return Ok(Vec::new())
        }
        Err(err) => return Err(err),
    };

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| {
            let (hash, subject) = line.split_once('|')?;
            Some(CommitLine {
                short_hash: hash.trim().to_string(),
                subject: subject.trim().to_string(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn git_in(dir: &Path, args: &[&str]) {
        let status = git_cmd()
            .current_dir(dir)
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_parse_numstat() {
        let text = "3\t1\tsrc/app.ts\n-\t-\tassets/logo.png\n10\t0\tdocs/a b.md\n\ngarbage\n";
        let changes = parse_numstat(text);

        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].insertions, 3);
        assert_eq!(changes[1].path, "assets/logo.png");
        assert_eq!(changes[1].insertions, 0);
        assert_eq!(changes[2].path, "docs/a b.md");

        let summary = DiffSummary::from_changes(changes);
        assert_eq!(summary.insertions, 13);
        assert_eq!(summary.deletions, 1);
    }

    #[test]
    fn test_not_a_repository() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        // A temp dir could sit inside a checkout; only assert when it does not
        if repo_root(dir.path()).is_some() {
            return;
        }
        assert!(matches!(
            ensure_repository(dir.path()),
            Err(LazydocsError::NotGitRepository { .. })
        ));
        assert!(matches!(
            diff_summary(dir.path()),
            Err(LazydocsError::NotGitRepository { .. })
        ));
        assert!(matches!(
            diff_text(dir.path()),
            Err(LazydocsError::NotGitRepository { .. })
        ));
    }

    #[test]
    fn test_not_a_repository_wording() {
        assert!(is_not_repository(
            "fatal: not a git repository (or any of the parent directories): .git"
        ));
        assert!(is_not_repository(
            "warning: Not a git repository. Use --no-index to compare two paths outside a working tree"
        ));
        assert!(!is_not_repository("fatal: bad revision 'HEAD'"));
    }

    #[test]
    fn test_diff_and_log_in_repository() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let root = dir.path();
        git_in(root, &["init", "-q"]);
        assert!(recent_commits(root, 10).unwrap().is_empty());

        fs::write(root.join("a.txt"), "one\ntwo\n").unwrap();
        git_in(root, &["add", "a.txt"]);
        git_in(root, &["commit", "-q", "-m", "Add a"]);
        fs::write(root.join("a.txt"), "one\nthree\nfour\n").unwrap();

        let summary = diff_summary(root).unwrap();
        assert_eq!(summary.files.len(), 1);
        assert_eq!(summary.files[0].path, "a.txt");
        assert_eq!(summary.insertions, 2);
        assert_eq!(summary.deletions, 1);
        assert!(diff_text(root).unwrap().contains("+three"));

        let commits = recent_commits(root, DEFAULT_COMMIT_LIMIT).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "Add a");
        assert!(!commits[0].short_hash.is_empty());
    }
}
