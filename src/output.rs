//! Output rendering for lint results and the rule list.
//!
//! Supports `human` (default) and `json` outputs. Human output marks clean
//! files with ✅, warnings with ⚠️ and errors with ❌, then prints a summary
//! line. The JSON form is the serialized result with a top-level summary.

use crate::checks::RuleInfo;
use crate::models::{LintResult, Severity};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} cannot serialize output: {}", crate::utils::error_prefix(), e),
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => print_json(res),
        _ => print!("{}", render_lint(res, use_colors(output))),
    }
}

/// Human-readable report (pure) for printing and tests.
pub fn render_lint(res: &LintResult, color: bool) -> String {
    let mut out = String::new();
    for report in &res.reports {
        if report.is_clean() {
            let file = if color {
                report.file.bold().to_string()
            } else {
                report.file.clone()
            };
            out.push_str(&format!("✅ {}\n", file));
            continue;
        }
        for d in &report.diagnostics {
            let icon = match d.severity {
                Severity::Error => "❌",
                Severity::Warning => "⚠️",
            };
            let sev = match (d.severity, color) {
                (Severity::Error, true) => "⟦error⟧".red().bold().to_string(),
                (Severity::Warning, true) => "⟦warn⟧".yellow().bold().to_string(),
                (Severity::Error, false) => "⟦error⟧".to_string(),
                (Severity::Warning, false) => "⟦warn⟧".to_string(),
            };
            let location = format!("{}:{}:{}", report.file, d.line, d.column);
            let location = if color {
                location.bold().to_string()
            } else {
                location
            };
            out.push_str(&format!(
                "{} {} {} ❲{}❳ — {}\n",
                icon, sev, location, d.rule, d.message
            ));
        }
    }
    for f in &res.failures {
        let sev = if color {
            "⟦failed⟧".red().bold().to_string()
        } else {
            "⟦failed⟧".to_string()
        };
        out.push_str(&format!("❌ {} {} — {}\n", sev, f.path, f.message));
    }
    let summary = format!(
        "— Summary — errors={} warnings={} files={} failures={}",
        res.summary.errors, res.summary.warnings, res.summary.files, res.summary.failures
    );
    if color {
        out.push_str(&summary.bold().to_string());
    } else {
        out.push_str(&summary);
    }
    out.push('\n');
    out
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Print the registered rules.
pub fn print_rules(rules: &[RuleInfo], output: &str) {
    match output {
        "json" => print_json(&rules),
        _ => {
            let color = use_colors(output);
            for r in rules {
                let id = format!("{:<24}", r.id);
                let id = if color { id.bold().to_string() } else { id };
                println!("{} {:<8} {}", id, r.severity.to_string(), r.description);
            }
        }
    }
}
