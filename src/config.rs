//! Configuration discovery and effective settings resolution.
//!
//! vixlint reads `vixlint.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags into an `Effective` config
//! holding the resolved `LintOptions` handed to the core.
//! Defaults:
//! - `output`: `human`
//! - `extensions`: `["vix"]`
//! - `indent.width`: 4, `indent.style`: `auto`
//! - `rules.disable`: none
//! - `if.max_statements`: 1
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::checks::{rule_ids, IndentMode, LintOptions};
use crate::models::declaration::DeclKind;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILES: &[&str] = &["vixlint.toml", "vixlint.yaml", "vixlint.yml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("unknown rule '{0}' (see `vixlint rules`)")]
    UnknownRule(String),
    #[error("invalid naming pattern for {kind}: {source}")]
    InvalidPattern {
        kind: &'static str,
        source: regex::Error,
    },
    #[error("{0}")]
    InvalidValue(String),
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Indentation section under `[indent]`.
pub struct IndentCfg {
    pub width: Option<usize>,
    pub style: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Rule selection under `[rules]`.
pub struct RulesCfg {
    #[serde(default)]
    pub disable: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Regex overrides for naming rules under `[naming]`.
pub struct NamingCfg {
    #[serde(rename = "const")]
    pub constant: Option<String>,
    #[serde(rename = "static")]
    pub static_: Option<String>,
    pub var: Option<String>,
    pub func: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Single-line `if` settings under `[if]`.
pub struct IfCfg {
    pub max_statements: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `vixlint.toml|yaml`.
pub struct VixlintConfig {
    pub output: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub indent: Option<IndentCfg>,
    pub rules: Option<RulesCfg>,
    pub naming: Option<NamingCfg>,
    #[serde(rename = "if")]
    pub if_stmt: Option<IfCfg>,
}

/// Flags from the command line; `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub repo_root: Option<String>,
    pub output: Option<String>,
    pub indent_width: Option<usize>,
    pub indent_style: Option<String>,
    pub disable: Vec<String>,
    pub enable: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub extensions: Vec<String>,
    pub options: LintOptions,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `vixlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `VixlintConfig` from `vixlint.toml` or `vixlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<VixlintConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let cfg = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ConfigError::Toml { path, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml { path, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

fn check_rule_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Result<(), ConfigError> {
    let known = rule_ids();
    for id in ids {
        if !known.contains(&id.as_str()) {
            return Err(ConfigError::UnknownRule(id.clone()));
        }
    }
    Ok(())
}

fn compile_naming(naming: &NamingCfg) -> Result<HashMap<DeclKind, Regex>, ConfigError> {
    let mut out = HashMap::new();
    let entries = [
        (DeclKind::Constant, &naming.constant),
        (DeclKind::Static, &naming.static_),
        (DeclKind::Variable, &naming.var),
        (DeclKind::Function, &naming.func),
    ];
    for (kind, pattern) in entries {
        if let Some(p) = pattern {
            let re = Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                kind: kind.keyword(),
                source,
            })?;
            out.insert(kind, re);
        }
    }
    Ok(out)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(ConfigError::InvalidValue(format!(
            "unknown output mode '{}' (human|json)",
            output
        )));
    }

    let extensions = cfg
        .extensions
        .unwrap_or_else(|| vec!["vix".to_string()])
        .into_iter()
        .map(|e| e.trim_start_matches('.').to_string())
        .collect();

    let indent = cfg.indent.unwrap_or_default();
    let indent_width = cli.indent_width.or(indent.width);
    if indent_width == Some(0) {
        return Err(ConfigError::InvalidValue(
            "indent width must be at least 1".into(),
        ));
    }
    let indent_mode = match cli.indent_style.as_deref().or(indent.style.as_deref()) {
        Some(s) => s.parse::<IndentMode>().map_err(ConfigError::InvalidValue)?,
        None => IndentMode::Auto,
    };

    let cfg_disable = cfg.rules.map(|r| r.disable).unwrap_or_default();
    check_rule_ids(cfg_disable.iter().chain(&cli.disable).chain(&cli.enable))?;
    let mut disabled: BTreeSet<String> = cfg_disable.into_iter().collect();
    disabled.extend(cli.disable.iter().cloned());
    for id in &cli.enable {
        disabled.remove(id);
    }

    let naming_patterns = compile_naming(&cfg.naming.unwrap_or_default())?;
    let max_if_statements = cfg
        .if_stmt
        .and_then(|i| i.max_statements)
        .unwrap_or(1);

    Ok(Effective {
        repo_root,
        config_found,
        output,
        extensions,
        options: LintOptions {
            indent_width,
            indent_mode,
            disabled,
            naming_patterns,
            max_if_statements,
        },
    })
}
