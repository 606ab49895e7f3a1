//! vixlint CLI binary entry point.
//! Resolves configuration, runs the lint pipeline and prints results.

use clap::Parser;
use vixlint::checks::describe_rules;
use vixlint::cli::{Cli, Commands};
use vixlint::config::{self, Overrides};
use vixlint::lint;
use vixlint::output::{print_lint, print_rules};
use vixlint::utils::{error_prefix, info_prefix, note_prefix};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            paths,
            repo_root,
            output,
            indent_width,
            indent_style,
            disable,
            enable,
        } => {
            let eff = match config::resolve_effective(&Overrides {
                repo_root,
                output,
                indent_width,
                indent_style,
                disable,
                enable,
            }) {
                Ok(eff) => eff,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            // Keep stderr quiet for machine output
            if eff.output != "json" {
                if !eff.config_found {
                    eprintln!("{} No vixlint.toml found; using defaults.", note_prefix());
                }
                if !eff.options.disabled.is_empty() {
                    let joined = eff.options.disabled.iter().cloned().collect::<Vec<_>>().join(", ");
                    eprintln!("{} Disabled rules: [{}]", info_prefix(), joined);
                }
            }
            let result = lint::run_lint(&eff.repo_root, &paths, &eff.extensions, &eff.options);
            print_lint(&result, &eff.output);
            std::process::exit(result.exit_code());
        }
        Commands::Rules { output } => {
            let output = output.unwrap_or_else(|| "human".to_string());
            print_rules(&describe_rules(), &output);
        }
    }
}
