//! Document generation against a canned chat client

use lazydocs::docgen::{
    generate_changelog, generate_pr_description, generate_readme, ChatClient, ChatRequest,
    DocGenerator,
};
use lazydocs::error::{LazydocsError, Result};
use lazydocs::git;
use lazydocs::output::MemoryReporter;
use lazydocs::DocConfig;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tempfile::tempdir;

/// Answers every request with a fixed reply and keeps the prompts
struct EchoClient {
    reply: String,
    prompts: RefCell<Vec<String>>,
}

impl EchoClient {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl ChatClient for EchoClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.prompts
            .borrow_mut()
            .push(request.messages[0].content.clone());
        Ok(self.reply.clone())
    }
}

/// Always fails with a transient error
struct FlakyClient {
    calls: RefCell<u32>,
}

impl ChatClient for FlakyClient {
    fn complete(&self, _request: &ChatRequest) -> Result<String> {
        *self.calls.borrow_mut() += 1;
        Err(LazydocsError::Network {
            message: "connection reset".to_string(),
        })
    }
}

fn git_in(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

#[test]
fn test_readme_includes_analysis_and_sections() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("server.ts"),
        "export class Server {}\nexport function listen(port: number) {}\n",
    )
    .unwrap();

    let client = EchoClient::new("Section body");
    let config = DocConfig::default();
    let reporter = MemoryReporter::new();
    let generator = DocGenerator::new(&client, &config, &reporter);

    let outcome = generate_readme(&generator, dir.path(), 6000, &reporter).unwrap();

    assert_eq!(outcome.analysis.file_count, 1);
    assert!(outcome.markdown.starts_with("# Your Project\n"));
    assert_eq!(outcome.markdown.matches("Section body").count(), 2);
    assert!(outcome.markdown.contains("- **listen**:"));
    assert!(outcome.markdown.contains("- **Server**:"));

    let prompts = client.prompts.borrow();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().all(|p| p.contains("Files: 1 | Lines: 3")));
}

#[test]
fn test_retries_are_bounded() {
    let dir = tempdir().unwrap();
    let client = FlakyClient {
        calls: RefCell::new(0),
    };
    let config = DocConfig::default();
    let reporter = MemoryReporter::new();
    let generator = DocGenerator::new(&client, &config, &reporter)
        .with_retries(2)
        .with_backoff(Duration::ZERO);

    let err = generate_readme(&generator, dir.path(), 6000, &reporter).unwrap_err();

    assert!(matches!(err, LazydocsError::Network { .. }));
    assert_eq!(*client.calls.borrow(), 2);
    assert!(reporter
        .warnings()
        .contains(&"Attempt 1/2 failed, retrying...".to_string()));
}

#[test]
fn test_pr_outside_repository_fails() {
    if !git::git_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let client = EchoClient::new("unused");
    let config = DocConfig::default();
    let reporter = MemoryReporter::new();
    let generator = DocGenerator::new(&client, &config, &reporter);

    let err = generate_pr_description(&generator, dir.path(), &reporter).unwrap_err();

    assert!(matches!(err, LazydocsError::NotGitRepository { .. }));
    assert!(err.is_critical());
    assert!(client.prompts.borrow().is_empty());
}

#[test]
fn test_pr_and_changelog_from_repository() {
    if !git::git_available() {
        return;
    }
    let dir = tempdir().unwrap();
    git_in(dir.path(), &["init", "-q"]);
    fs::write(dir.path().join("app.js"), "function a() {}\n").unwrap();
    git_in(dir.path(), &["add", "."]);
    git_in(dir.path(), &["commit", "-q", "-m", "Add app entry point"]);
    fs::write(dir.path().join("app.js"), "function a() {}\nfunction b() {}\n").unwrap();

    let client = EchoClient::new("Generated");
    let config = DocConfig::default();
    let reporter = MemoryReporter::new();
    let generator = DocGenerator::new(&client, &config, &reporter);

    let pr = generate_pr_description(&generator, dir.path(), &reporter).unwrap();
    assert_eq!(pr, "Generated");

    let changelog = generate_changelog(&generator, dir.path(), 50, &reporter).unwrap();
    assert_eq!(changelog, "Generated");

    let prompts = client.prompts.borrow();
    assert!(prompts[0].contains("Files changed: 1"));
    assert!(prompts[0].contains("- app.js (+1/-0)"));
    assert!(prompts[0].contains("+function b() {}"));
    assert!(prompts[1].contains("Add app entry point"));
}

#[test]
fn test_changelog_without_commits_fails() {
    if !git::git_available() {
        return;
    }
    let dir = tempdir().unwrap();
    git_in(dir.path(), &["init", "-q"]);

    let client = EchoClient::new("unused");
    let config = DocConfig::default();
    let reporter = MemoryReporter::new();
    let generator = DocGenerator::new(&client, &config, &reporter);

    let err = generate_changelog(&generator, dir.path(), 50, &reporter).unwrap_err();
    assert!(matches!(err, LazydocsError::Git { .. }));
    assert!(client.prompts.borrow().is_empty());
}
