//! Lint runner: one pass per file, files linted in parallel.
//!
//! A pass is tokenizer → declaration scan → rules → sorted report. Passes
//! share nothing, so `rayon` can run them concurrently; results are ordered
//! by path afterwards so output stays deterministic.

use crate::checks::{run_checks, Context, LintOptions};
use crate::models::declaration::Declarations;
use crate::models::{Diagnostic, FileFailure, LintReport, LintResult, Severity};
use crate::tokenize::tokenize;
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Rule id used for lines the tokenizer could not read.
pub const UNTERMINATED_STRING: &str = "unterminated-string";

/// Lint one source text. Tokenizer failures come first, then rule output in
/// registry order; `LintReport::new` applies the final ordering.
pub fn lint_source(source: &str, options: &LintOptions) -> Vec<Diagnostic> {
    let tokenized = tokenize(source);
    let mut diagnostics: Vec<Diagnostic> = tokenized
        .errors
        .iter()
        .map(|e| {
            let (line, column) = e.position();
            Diagnostic::new(UNTERMINATED_STRING, Severity::Error, e.to_string(), line, column)
        })
        .collect();
    let declarations = Declarations::scan(&tokenized.lines);
    let ctx = Context {
        lines: &tokenized.lines,
        declarations: &declarations,
        options,
    };
    diagnostics.extend(run_checks(&ctx));
    diagnostics
}

/// Read and lint a single file. `display` is the name used in the report.
pub fn lint_file(path: &Path, display: &str, options: &LintOptions) -> Result<LintReport, FileFailure> {
    let source = fs::read_to_string(path).map_err(|e| FileFailure {
        path: display.to_string(),
        message: format!("cannot read file: {}", e),
    })?;
    Ok(LintReport::new(display, lint_source(&source, options)))
}

fn has_glob_chars(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand CLI inputs into concrete files.
///
/// - plain files are taken as-is, whatever their extension;
/// - directories are searched recursively for the given extensions;
/// - anything with `*`, `?` or `[` is a glob pattern.
///
/// Inputs that resolve to nothing become failures.
pub fn collect_targets(inputs: &[String], extensions: &[String]) -> (Vec<PathBuf>, Vec<FileFailure>) {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    let mut failures = Vec::new();
    for input in inputs {
        let path = PathBuf::from(input);
        let patterns: Vec<String> = if path.is_file() {
            targets.insert(path);
            continue;
        } else if path.is_dir() {
            extensions
                .iter()
                .map(|ext| path.join("**").join(format!("*.{}", ext)).to_string_lossy().to_string())
                .collect()
        } else if has_glob_chars(input) {
            vec![input.clone()]
        } else {
            failures.push(FileFailure {
                path: input.clone(),
                message: "file not found".into(),
            });
            continue;
        };

        // Files already collected from an earlier input still count as matches.
        let mut matched = 0usize;
        let mut invalid = false;
        for pattern in &patterns {
            match glob(pattern) {
                Ok(paths) => {
                    for entry in paths.flatten() {
                        if entry.is_file() {
                            matched += 1;
                            targets.insert(entry);
                        }
                    }
                }
                Err(e) => {
                    invalid = true;
                    failures.push(FileFailure {
                        path: input.clone(),
                        message: format!("invalid glob pattern: {}", e),
                    });
                }
            }
        }
        if matched == 0 && !invalid {
            failures.push(FileFailure {
                path: input.clone(),
                message: "no files matched".into(),
            });
        }
    }
    (targets.into_iter().collect(), failures)
}

/// Path shown in reports: relative to `root` when the file lives under it.
pub fn display_path(root: &Path, path: &Path) -> String {
    let abs = |p: &Path| fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    match pathdiff::diff_paths(abs(path), abs(root)) {
        Some(rel) if !rel.starts_with("..") && !rel.as_os_str().is_empty() => {
            rel.to_string_lossy().to_string()
        }
        _ => path.to_string_lossy().to_string(),
    }
}

/// Lint every input path and aggregate the per-file reports.
pub fn run_lint(
    root: &Path,
    inputs: &[String],
    extensions: &[String],
    options: &LintOptions,
) -> LintResult {
    let (targets, mut failures) = collect_targets(inputs, extensions);
    let outcomes: Vec<Result<LintReport, FileFailure>> = targets
        .par_iter()
        .map(|path| lint_file(path, &display_path(root, path), options))
        .collect();
    let mut reports = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(failure) => failures.push(failure),
        }
    }
    LintResult::new(reports, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rules(diags: &[Diagnostic]) -> Vec<&str> {
        diags.iter().map(|d| d.rule).collect()
    }

    #[test]
    fn test_const_scenario() {
        let report = LintReport::new("t.vix", lint_source("const maxUsers=100", &LintOptions::default()));
        assert_eq!(rules(&report.diagnostics), vec!["const-naming", "operator-spacing"]);
        assert_eq!(report.diagnostics[0].message, "\"maxUsers\" is not UPPER_SNAKE_CASE");
        assert_eq!(report.diagnostics[1].message, "missing spaces around \"=\"");
        assert!(report.diagnostics.iter().all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn test_empty_source_is_clean() {
        assert!(lint_source("", &LintOptions::default()).is_empty());
    }

    #[test]
    fn test_unterminated_string_is_local() {
        let diags = lint_source("var a = \"oops\nvar b=1", &LintOptions::default());
        let report = LintReport::new("t.vix", diags);
        assert_eq!(rules(&report.diagnostics), vec![UNTERMINATED_STRING, "operator-spacing"]);
        assert_eq!(report.diagnostics[0].line, 1);
        assert_eq!(report.diagnostics[1].line, 2);
    }

    #[test]
    fn test_lint_is_idempotent() {
        let src = "const maxUsers=100\nfunc doThing(a,b)\nif a then\nb = 1\nend\nend\n";
        let a = LintReport::new("t.vix", lint_source(src, &LintOptions::default()));
        let b = LintReport::new("t.vix", lint_source(src, &LintOptions::default()));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_run_lint_over_directory_and_missing_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("src/good.vix"), "const MAX = 1\n").unwrap();
        fs::write(root.join("src/nested/bad.vix"), "var userName=1\n").unwrap();
        fs::write(root.join("src/notes.txt"), "x=1\n").unwrap();

        let inputs = vec![
            root.join("src").to_string_lossy().to_string(),
            root.join("missing.vix").to_string_lossy().to_string(),
        ];
        let result = run_lint(root, &inputs, &["vix".to_string()], &LintOptions::default());
        let files: Vec<_> = result.reports.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["src/good.vix", "src/nested/bad.vix"]);
        assert!(result.reports[0].is_clean());
        assert_eq!(result.summary.errors, 1);
        assert_eq!(result.summary.warnings, 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].message, "file not found");
        assert_eq!(result.exit_code(), 2);
    }

    #[test]
    fn test_glob_without_matches_is_a_failure() {
        let dir = tempdir().unwrap();
        let pattern = dir.path().join("*.vix").to_string_lossy().to_string();
        let (targets, failures) = collect_targets(&[pattern], &["vix".to_string()]);
        assert!(targets.is_empty());
        assert_eq!(failures[0].message, "no files matched");
    }

    #[test]
    fn test_overlapping_inputs_are_not_failures() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.vix"), "const MAX = 1\n").unwrap();
        let inputs = vec![
            root.join("a.vix").to_string_lossy().to_string(),
            root.to_string_lossy().to_string(),
            root.join("*.vix").to_string_lossy().to_string(),
        ];
        let result = run_lint(root, &inputs, &["vix".to_string()], &LintOptions::default());
        assert!(result.failures.is_empty(), "{:?}", result.failures);
        assert_eq!(result.summary.files, 1);
        assert_eq!(result.exit_code(), 0);
    }
}
