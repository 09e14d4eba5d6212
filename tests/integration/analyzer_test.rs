//! End-to-end analyzer behavior over temporary source trees

use lazydocs::config::load_project_settings;
use lazydocs::core::Analyzer;
use lazydocs::output::MemoryReporter;
use lazydocs::{analyze, AnalysisResult};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn run(root: &Path, budget: usize) -> (AnalysisResult, MemoryReporter) {
    let reporter = MemoryReporter::new();
    let result = Analyzer::new(&reporter)
        .with_token_budget(budget)
        .analyze(root);
    (result, reporter)
}

#[test]
fn test_counts_agree_with_records() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.js", "function main() {}\nmain();\n");
    write(dir.path(), "src/util.ts", "export function pad(s: string) { return s; }\n");
    write(dir.path(), "src/deep/model.tsx", "class View {}\n");
    write(dir.path(), "notes.md", "# not source\n");

    let (result, _) = run(dir.path(), 6000);

    assert_eq!(result.file_count, 3);
    assert_eq!(result.file_count, result.file_records.len());
    let summed: usize = result.file_records.iter().map(|r| r.line_count).sum();
    assert_eq!(result.total_lines, summed);
    // "a\nb\n" splits into three segments
    let index = result
        .file_records
        .iter()
        .find(|r| r.path == "index.js")
        .unwrap();
    assert_eq!(index.line_count, 3);
    assert!(result.file_records.iter().any(|r| r.path == "src/deep/model.tsx"));
}

#[test]
fn test_duplicate_names_collapse() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.js", "function helper() {}\n");
    write(dir.path(), "b.js", "function helper() { return 1; }\n");

    let (result, _) = run(dir.path(), 6000);

    assert_eq!(result.file_count, 2);
    assert_eq!(
        result.function_names.iter().filter(|n| *n == "helper").count(),
        1
    );
    let per_file: usize = result.file_records.iter().map(|r| r.function_count).sum();
    assert_eq!(per_file, 2);
}

#[test]
fn test_excluded_directories_contribute_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "app.js", "function visible() {}\n");
    write(dir.path(), "node_modules/pkg/index.js", "function hiddenDep() {}\n");
    write(dir.path(), "dist/bundle.js", "class HiddenBundle {}\n");
    write(dir.path(), "src/coverage/report.js", "function hiddenCoverage() {}\n");

    let (result, _) = run(dir.path(), 6000);

    assert_eq!(result.file_count, 1);
    assert!(result.function_names.contains("visible"));
    assert!(!result.function_names.contains("hiddenDep"));
    assert!(!result.function_names.contains("hiddenCoverage"));
    assert!(result.class_names.is_empty());
    assert!(!result.combined_snippet.contains("node_modules"));
}

#[test]
fn test_empty_root_yields_empty_result() {
    let dir = tempdir().unwrap();
    write(dir.path(), "README.md", "# nothing to parse\n");

    let (result, reporter) = run(dir.path(), 6000);

    assert_eq!(result.file_count, 0);
    assert!(result.function_names.is_empty());
    assert!(result.class_names.is_empty());
    assert_eq!(result.combined_snippet, "");
    assert_eq!(result.complexity_score, 0.0);
    assert!(reporter.is_empty());
}

#[test]
fn test_missing_root_is_not_an_error() {
    let result = analyze("/definitely/does/not/exist", 6000);

    assert_eq!(result.file_count, 0);
    assert!(result.file_records.is_empty());
    assert_eq!(result.combined_snippet, "");
}

#[test]
fn test_missing_root_is_reported() {
    let (result, reporter) = run(Path::new("/definitely/does/not/exist"), 6000);

    assert!(result.is_empty());
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("/definitely/does/not/exist"));
}

#[test]
fn test_declarations_and_complexity() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "sample.js",
        r#"
function anotherFunction() {
  return 42;
}

class AnotherClass {
  method() {
    return "hello";
  }
}

const arrowFunc = () => {
  return "arrow";
};
"#,
    );

    let (result, _) = run(dir.path(), 6000);

    assert!(result.function_names.contains("anotherFunction"));
    assert!(result.function_names.contains("arrowFunc"));
    assert!(result.class_names.contains("AnotherClass"));
    // methods are not top-level declarations
    assert!(!result.function_names.contains("method"));
    assert!(result.complexity_score >= 5.0);

    let record = &result.file_records[0];
    assert_eq!(record.function_count, 2);
    assert_eq!(record.class_count, 1);
}

#[test]
fn test_top_level_branches_raise_complexity() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "flow.js",
        "if (a) { b(); }\nfor (let i = 0; i < 3; i++) {}\nwhile (x) { x--; }\n",
    );

    let (result, _) = run(dir.path(), 6000);

    assert_eq!(result.complexity_score, 4.0);
}

#[test]
fn test_unparseable_file_still_counts_stats() {
    let dir = tempdir().unwrap();
    write(dir.path(), "broken.js", "function ok() {}\nconst broken = ;\nclass Later {}\n");

    let (result, reporter) = run(dir.path(), 6000);

    assert_eq!(result.file_count, 1);
    assert_eq!(result.total_lines, 4);
    assert!(result.function_names.is_empty());
    assert!(result.class_names.is_empty());
    assert_eq!(result.file_records[0].function_count, 0);
    assert_eq!(result.complexity_score, 0.0);

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Failed to parse"));
    assert!(warnings[0].contains("broken.js"));
}

#[test]
fn test_recovered_file_keeps_partial_declarations() {
    let dir = tempdir().unwrap();
    write(dir.path(), "partial.js", "function ok() {}\nreturn 5;\nclass Later {}\n");

    let (result, reporter) = run(dir.path(), 6000);

    assert!(result.function_names.contains("ok"));
    assert!(result.class_names.contains("Later"));
    let record = &result.file_records[0];
    assert_eq!(record.function_count, 1);
    assert_eq!(record.class_count, 1);
    // base 1 + function 1 + class 2
    assert_eq!(result.complexity_score, 4.0);

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Recovered from syntax errors"));
    assert!(warnings[0].contains("partial.js"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write(dir.path(), "open.js", "function open() {}\n");
    write(dir.path(), "locked.js", "function locked() {}\n//\n//\n");
    let locked = dir.path().join("locked.js");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores file modes
    if fs::read(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let (result, reporter) = run(dir.path(), 6000);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(result.file_count, 1);
    assert_eq!(result.file_records[0].path, "open.js");
    assert_eq!(result.total_lines, 2);
    assert!(!result.function_names.contains("locked"));
    assert!(!result.combined_snippet.contains("locked.js"));

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("locked.js"));
}

#[test]
fn test_budget_stops_appending_excerpts() {
    let dir = tempdir().unwrap();
    let body = format!("// {}\n", "x".repeat(200));
    write(dir.path(), "one.js", &body);
    write(dir.path(), "two.js", &body);
    write(dir.path(), "three.js", &body);

    let (result, _) = run(dir.path(), 10);

    // The first excerpt alone exceeds ten tokens
    assert_eq!(result.combined_snippet.matches("// File: ").count(), 1);
    assert_eq!(result.file_count, 3);
}

#[test]
fn test_snippet_never_exceeds_ceiling() {
    let dir = tempdir().unwrap();
    for i in 0..10 {
        write(
            dir.path(),
            &format!("file{}.js", i),
            &format!("// {}\n", "y".repeat(2500)),
        );
    }

    let (result, _) = run(dir.path(), 1_000_000);

    assert_eq!(result.combined_snippet.chars().count(), 8000);
    // each excerpt is capped well below the file size
    assert!(!result.combined_snippet.contains(&"y".repeat(2000)));
}

#[test]
fn test_summary_ranks_largest_files() {
    let dir = tempdir().unwrap();
    for lines in 1..=17 {
        write(
            dir.path(),
            &format!("f{:02}.js", lines),
            &"//\n".repeat(lines),
        );
    }

    let (result, _) = run(dir.path(), 6000);
    let summary = &result.compact_summary;

    assert!(summary.starts_with("Files: 17 | Lines: "));
    let listed: Vec<&str> = summary
        .lines()
        .filter(|line| line.starts_with("- "))
        .collect();
    assert_eq!(listed.len(), 15);
    assert!(listed[0].starts_with("- f17.js (18 lines"));
    assert!(listed[14].starts_with("- f03.js (4 lines"));
    assert!(summary.ends_with("... and 2 more files"));
}

#[test]
fn test_summary_ties_keep_traversal_order() {
    let dir = tempdir().unwrap();
    for name in ["a.js", "b.js", "c.js"] {
        write(dir.path(), name, "//\n//\n");
    }

    let (result, _) = run(dir.path(), 6000);

    let traversal: Vec<String> = result
        .file_records
        .iter()
        .map(|r| format!("- {} (3 lines)", r.path))
        .collect();
    let listed: Vec<String> = result
        .compact_summary
        .lines()
        .filter(|line| line.starts_with("- "))
        .map(str::to_string)
        .collect();
    assert_eq!(listed, traversal);
}

#[test]
fn test_project_file_overrides_extensions() {
    let dir = tempdir().unwrap();
    write(dir.path(), "keep.ts", "function kept() {}\n");
    write(dir.path(), "skip.js", "function skipped() {}\n");
    write(dir.path(), "vendor/extra.ts", "function vendored() {}\n");
    write(
        dir.path(),
        ".lazydocs.json",
        r#"{"extensions": [".ts"], "excludeDirs": ["vendor"]}"#,
    );

    let reporter = MemoryReporter::new();
    let project = load_project_settings(dir.path(), &reporter);
    let result = Analyzer::new(&reporter)
        .with_exclusions(project.exclusion_set())
        .analyze(dir.path());

    assert_eq!(result.file_count, 1);
    assert!(result.function_names.contains("kept"));
    assert!(!result.function_names.contains("skipped"));
    assert!(!result.function_names.contains("vendored"));
}

#[test]
fn test_malformed_project_file_falls_back() {
    let dir = tempdir().unwrap();
    write(dir.path(), "app.js", "function app() {}\n");
    write(dir.path(), ".lazydocs.json", "{ not json");

    let reporter = MemoryReporter::new();
    let project = load_project_settings(dir.path(), &reporter);
    let result = Analyzer::new(&reporter)
        .with_exclusions(project.exclusion_set())
        .analyze(dir.path());

    assert_eq!(result.file_count, 1);
    assert_eq!(reporter.warnings().len(), 1);
}
