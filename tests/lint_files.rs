use std::fs;
use tempfile::tempdir;
use vixlint::checks::LintOptions;
use vixlint::lint::{lint_source, run_lint};
use vixlint::models::{LintReport, Severity};
use vixlint::output::render_lint;

const CLEAN: &str = r#"// Example module following the style guide
const MAX_USERS = 100
static mut REQUEST_COUNT = 0

/ Adds two numbers /
func add(a, b)
    return a + b
end

func process_users(users)
    var total_count = 0
    for user in users do
        if user.age >= 18 then
            total_count += 1
        else
            log("minor: " + user.name)
        end
    end
    if total_count == 0 then return none end
    return total_count
end
"#;

const MESSY: &str = "const maxUsers=100\nfunc example(a,b,c)\nif a then\nb = 1\nend\nend\n";

fn summary(report: &LintReport) -> Vec<(&str, usize, usize)> {
    report
        .diagnostics
        .iter()
        .map(|d| (d.rule, d.line, d.column))
        .collect()
}

#[test]
fn clean_module_has_no_diagnostics() {
    let diags = lint_source(CLEAN, &LintOptions::default());
    assert!(diags.is_empty(), "{:#?}", diags);
}

#[test]
fn messy_module_reports_every_rule_in_position_order() {
    let report = LintReport::new("messy.vix", lint_source(MESSY, &LintOptions::default()));
    assert_eq!(
        summary(&report),
        vec![
            ("const-naming", 1, 7),
            ("operator-spacing", 1, 15),
            ("comma-spacing", 2, 15),
            ("comma-spacing", 2, 17),
            ("indentation-consistency", 3, 1),
            ("indentation-consistency", 4, 1),
        ]
    );
    assert_eq!(report.summary.errors, 4);
    assert_eq!(report.summary.warnings, 2);
}

#[test]
fn var_with_constant_name_is_only_a_warning() {
    let diags = lint_source("var USER_NAME = \"john\"", &LintOptions::default());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "var-naming");
    assert_eq!(diags[0].severity, Severity::Warning);
}

#[test]
fn multi_file_run_is_deterministic_and_sets_exit_code() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("clean.vix"), CLEAN).unwrap();
    fs::write(root.join("messy.vix"), MESSY).unwrap();
    fs::write(root.join("empty.vix"), "").unwrap();

    let inputs = vec![root.to_string_lossy().to_string()];
    let exts = vec!["vix".to_string()];
    let first = run_lint(root, &inputs, &exts, &LintOptions::default());
    let second = run_lint(root, &inputs, &exts, &LintOptions::default());

    assert_eq!(render_lint(&first, false), render_lint(&second, false));
    let files: Vec<_> = first.reports.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["clean.vix", "empty.vix", "messy.vix"]);
    assert_eq!(first.summary.files, 3);
    assert_eq!(first.exit_code(), 1);
}

#[test]
fn warnings_alone_exit_clean() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("warn.vix"), "func doThing(a,b)\nend\n").unwrap();
    let inputs = vec![root.join("warn.vix").to_string_lossy().to_string()];
    let result = run_lint(root, &inputs, &["vix".to_string()], &LintOptions::default());
    assert_eq!(result.summary.errors, 0);
    assert_eq!(result.summary.warnings, 2);
    assert_eq!(result.exit_code(), 0);
}

#[test]
fn empty_file_exits_clean() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("empty.vix"), "").unwrap();
    let inputs = vec![root.join("empty.vix").to_string_lossy().to_string()];
    let result = run_lint(root, &inputs, &["vix".to_string()], &LintOptions::default());
    assert!(result.reports[0].is_clean());
    assert_eq!(result.exit_code(), 0);
    assert!(render_lint(&result, false).starts_with("✅ empty.vix\n"));
}
