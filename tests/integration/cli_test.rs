//! Command-line behavior that needs no network or user configuration

use clap::Parser;
use lazydocs::cli::{Args, Command};
use lazydocs::output::MemoryReporter;
use std::fs;
use tempfile::tempdir;

fn run(argv: &[&str]) -> (i32, MemoryReporter) {
    let args = Args::try_parse_from(argv).unwrap();
    let reporter = MemoryReporter::new();
    let code = Command::from_args(args).run(&reporter);
    (code, reporter)
}

#[test]
fn test_analyze_csv_report() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "function a() {}\nclass B {}\n").unwrap();
    fs::write(dir.path().join("b.ts"), "const c = () => 1;\n").unwrap();
    let out = dir.path().join("report.csv");

    let (code, reporter) = run(&[
        "lazydocs",
        "--quiet",
        "analyze",
        "-i",
        dir.path().to_str().unwrap(),
        "--format",
        "csv",
        "-o",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, 0);
    assert!(reporter.is_empty());
    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Path,Lines,Size (bytes),Functions,Classes");
    assert_eq!(lines.len(), 4);
    assert!(lines[3].starts_with("TOTAL,5,"));
}

#[test]
fn test_analyze_text_report_to_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.py.txt"), "ignored").unwrap();
    fs::write(dir.path().join("index.mjs"), "export function boot() {}\n").unwrap();
    let out = dir.path().join("summary.txt");

    let (code, _) = run(&[
        "lazydocs",
        "--no-colors",
        "--quiet",
        "analyze",
        "-i",
        dir.path().to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Files: 1 | Lines: 2 | Size: 0.0 KB\n"
    );
}

#[test]
fn test_unwritable_output_is_critical() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("missing").join("report.json");

    let (code, reporter) = run(&[
        "lazydocs",
        "--quiet",
        "analyze",
        "-i",
        dir.path().to_str().unwrap(),
        "--format",
        "json",
        "-o",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, 2);
    assert_eq!(reporter.entries().len(), 1);
    assert!(reporter.entries()[0].message.contains("report.json"));
}

#[test]
fn test_init_uses_package_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name": "from-package"}"#).unwrap();

    let (code, _) = run(&[
        "lazydocs",
        "--quiet",
        "init",
        "-i",
        dir.path().to_str().unwrap(),
        "--description",
        "A small tool",
    ]);

    assert_eq!(code, 0);
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(".lazydocs.json")).unwrap())
            .unwrap();
    assert_eq!(written["projectName"], "from-package");
    assert_eq!(written["description"], "A small tool");
    assert!(written["createdAt"].is_string());
}
