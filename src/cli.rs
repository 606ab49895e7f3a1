//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vixlint",
    version,
    about = "Style checker for Vix sources",
    long_about = "vixlint — checks Vix sources against the style guide: naming, operator and comma spacing, indentation, and if formatting.\n\nConfiguration precedence: CLI > vixlint.toml > defaults.",
    after_help = "Examples:\n  vixlint lint src/\n  vixlint lint main.vix lib/*.vix --output json\n  vixlint lint src --disable comma-spacing --indent-width 2\n  vixlint rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current vixlint version.")]
    Version,
    /// Lint Vix files
    #[command(
        about = "Run lint checks",
        long_about = "Check files, directories (searched for *.vix) or glob patterns. Exits 1 on error diagnostics, 2 when a path cannot be linted or the configuration is invalid.",
        after_help = "Examples:\n  vixlint lint src/\n  vixlint lint 'scripts/**/*.vix' --output json"
    )]
    Lint {
        #[arg(required = true, help = "Files, directories or glob patterns")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Spaces per indentation level (default: from the first indented line)")]
        indent_width: Option<usize>,
        #[arg(long, help = "Indentation unit: auto|spaces|tabs (default: auto)")]
        indent_style: Option<String>,
        #[arg(long = "disable", value_name = "RULE", help = "Disable a rule (repeatable)")]
        disable: Vec<String>,
        #[arg(long = "enable", value_name = "RULE", help = "Re-enable a rule disabled in config (repeatable)")]
        enable: Vec<String>,
    },
    /// List available rules
    #[command(about = "List rules", long_about = "Print every rule with its severity and description.")]
    Rules {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lint_flags() {
        let cli = Cli::try_parse_from([
            "vixlint",
            "lint",
            "a.vix",
            "src",
            "--disable",
            "comma-spacing",
            "--disable",
            "func-naming",
            "--indent-width",
            "2",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Lint {
                paths,
                disable,
                indent_width,
                ..
            } => {
                assert_eq!(paths, vec!["a.vix", "src"]);
                assert_eq!(disable, vec!["comma-spacing", "func-naming"]);
                assert_eq!(indent_width, Some(2));
            }
            _ => panic!("expected lint"),
        }
    }

    #[test]
    fn test_lint_requires_paths() {
        assert!(Cli::try_parse_from(["vixlint", "lint"]).is_err());
    }
}
