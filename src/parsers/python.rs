//! Python extraction through an external interpreter
//!
//! There is no Python parser in process, so the file is handed to a short
//! extraction program run by the system interpreter. The program is staged
//! as a temporary file that is removed when the call returns, whatever the
//! outcome, and the interpreter is killed once the timeout elapses.

use super::{Extraction, StructuralExtractor};
use crate::error::{LazydocsError, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Hard wall-clock limit for one delegate run
pub const DEFAULT_DELEGATE_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long pipe readers get to see end-of-file once the delegate is gone
const READER_GRACE: Duration = Duration::from_millis(250);

/// Walks the whole module: names of every def and class, and
/// complexity = branches + functions + 2 * classes
const EXTRACTOR_SCRIPT: &str = r#"import ast
import json
import sys

with open(sys.argv[1], "r", encoding="utf-8", errors="replace") as handle:
    tree = ast.parse(handle.read(), filename=sys.argv[1])

functions = []
classes = []
branches = 0
for node in ast.walk(tree):
    if isinstance(node, (ast.FunctionDef, ast.AsyncFunctionDef)):
        functions.append(node.name)
    elif isinstance(node, ast.ClassDef):
        classes.append(node.name)
    elif isinstance(node, (ast.If, ast.For, ast.AsyncFor, ast.While)):
        branches += 1

print(json.dumps({
    "functions": functions,
    "classes": classes,
    "complexity": branches + len(functions) + 2 * len(classes),
}))
"#;

#[derive(Debug, Deserialize)]
struct DelegateResponse {
    #[serde(default)]
    functions: Vec<String>,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    complexity: u32,
}

/// Subprocess-backed extractor for `.py` files
pub struct PythonExtractor {
    interpreter: String,
    script: Cow<'static, str>,
    timeout: Duration,
    scratch_dir: Option<PathBuf>,
}

impl PythonExtractor {
    /// Use `python3` from `PATH` with the default timeout
    pub fn new() -> Self {
        Self {
            interpreter: "python3".to_string(),
            script: Cow::Borrowed(EXTRACTOR_SCRIPT),
            timeout: DEFAULT_DELEGATE_TIMEOUT,
            scratch_dir: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stage the extraction program here instead of the system temp dir
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Replace the extraction program run by the interpreter.
    ///
    /// It receives the absolute source path as its only argument and must
    /// print `{"functions": [...], "classes": [...], "complexity": n}`.
    pub fn with_script(mut self, script: impl Into<Cow<'static, str>>) -> Self {
        self.script = script.into();
        self
    }

    fn stage_script(&self) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("lazydocs-ast-").suffix(".py");
        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(self.script.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    /// Run the interpreter, killing it once the deadline passes
    fn run(&self, script: &Path, target: &Path) -> std::result::Result<(ExitStatus, String, String), String> {
        let mut child = Command::new(&self.interpreter)
            .arg(script)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("could not start {}: {}", self.interpreter, e))?;

        // Drain both pipes on their own threads so a chatty child cannot
        // block on a full pipe while we wait for it
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || drain(stdout));
        let stderr_reader = thread::spawn(move || drain(stderr));

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    reap_readers(stdout_reader, stderr_reader);
                    return Err(format!(
                        "extractor timed out after {} ms",
                        self.timeout.as_millis()
                    ));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    reap_readers(stdout_reader, stderr_reader);
                    return Err(format!("lost track of extractor process: {}", e));
                }
            }
        };

        let reader_deadline = Instant::now() + READER_GRACE;
        let stdout = join_by(stdout_reader, reader_deadline).unwrap_or_default();
        let stderr = join_by(stderr_reader, reader_deadline).unwrap_or_default();
        Ok((status, stdout, stderr))
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralExtractor for PythonExtractor {
    fn name(&self) -> &'static str {
        "python"
    }

    fn handles(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some("py")
    }

    fn extract(&self, path: &Path, _source: &str) -> Result<Extraction> {
        let target = path
            .canonicalize()
            .map_err(|e| LazydocsError::parse_fatal(path, e.to_string()))?;

        // Deleted when `script` drops, on every return path below
        let script = self
            .stage_script()
            .map_err(|e| LazydocsError::parse_fatal(path, format!("could not stage extractor: {}", e)))?;

        let (status, stdout, stderr) = self
            .run(script.path(), &target)
            .map_err(|message| LazydocsError::parse_fatal(path, message))?;

        if !status.success() {
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("extractor exited unsuccessfully")
                .trim()
                .to_string();
            return Err(LazydocsError::parse_fatal(path, reason));
        }

        let response: DelegateResponse = serde_json::from_str(stdout.trim()).map_err(|e| {
            LazydocsError::parse_fatal(path, format!("unexpected extractor output: {}", e))
        })?;

        Ok(Extraction {
            functions: response.functions,
            classes: response.classes,
            complexity: response.complexity,
            recovered_errors: Vec::new(),
        })
    }
}

/// Join the readers of a killed delegate.
///
/// Only the direct child is killed. A process it spawned may still hold the
/// pipes open, in which case its readers are left to finish on their own
/// after [`READER_GRACE`] instead of blocking the walk.
fn reap_readers(stdout: JoinHandle<String>, stderr: JoinHandle<String>) {
    let deadline = Instant::now() + READER_GRACE;
    for reader in [stdout, stderr] {
        if join_by(reader, deadline).is_none() {
            tracing::debug!("delegate pipe still held open after kill, reader detached");
        }
    }
}

/// The reader's output if it finishes before `deadline`
fn join_by(reader: JoinHandle<String>, deadline: Instant) -> Option<String> {
    while !reader.is_finished() {
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(POLL_INTERVAL);
    }
    reader.join().ok()
}

fn drain<R: Read>(pipe: Option<R>) -> String {
    let mut buffer = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut buffer);
    }
    buffer
}
