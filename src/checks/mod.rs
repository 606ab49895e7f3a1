//! Rule engine.
//!
//! Every rule is an independent, pure check over the tokenized lines and the
//! declarations scanned from them. Rules run in the fixed order of
//! [`registry`]; none reads another rule's output, so enabling or disabling
//! one never changes what the others report.

pub mod indent;
pub mod naming;
pub mod single_line_if;
pub mod spacing;

use crate::models::declaration::{DeclKind, Declarations, NamingStyle};
use crate::models::token::{Line, Token, TokenKind};
use crate::models::{Diagnostic, Severity};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

/// How the indentation unit is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndentMode {
    /// The first indented line decides between spaces and tabs, and, with
    /// no explicit width, how many spaces make a level.
    #[default]
    Auto,
    Spaces,
    Tabs,
}

impl FromStr for IndentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(IndentMode::Auto),
            "spaces" | "space" => Ok(IndentMode::Spaces),
            "tabs" | "tab" => Ok(IndentMode::Tabs),
            other => Err(format!("unknown indent style '{}' (auto|spaces|tabs)", other)),
        }
    }
}

pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Resolved options handed to a lint pass. The core never reads config files.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Spaces per level. `None` infers it in auto mode and falls back to
    /// [`DEFAULT_INDENT_WIDTH`] otherwise.
    pub indent_width: Option<usize>,
    pub indent_mode: IndentMode,
    pub disabled: BTreeSet<String>,
    /// Regex replacing the built-in naming style check per declaration kind.
    pub naming_patterns: HashMap<DeclKind, Regex>,
    /// Statements allowed in the body of a single-line `if`.
    pub max_if_statements: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            indent_width: None,
            indent_mode: IndentMode::Auto,
            disabled: BTreeSet::new(),
            naming_patterns: HashMap::new(),
            max_if_statements: 1,
        }
    }
}

impl LintOptions {
    pub fn is_enabled(&self, rule: &str) -> bool {
        !self.disabled.contains(rule)
    }
}

/// Inputs shared by all rules during one pass.
pub struct Context<'a> {
    pub lines: &'a [Line],
    pub declarations: &'a Declarations,
    pub options: &'a LintOptions,
}

pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. `const-naming`.
    fn id(&self) -> &'static str;

    fn severity(&self) -> Severity;

    fn description(&self) -> &'static str;

    fn check(&self, ctx: &Context<'_>) -> Vec<Diagnostic>;

    fn diagnostic(&self, message: String, line: usize, column: usize) -> Diagnostic {
        Diagnostic::new(self.id(), self.severity(), message, line, column)
    }
}

/// All rules in evaluation order.
pub fn registry() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(naming::NamingRule::CONST),
        Box::new(naming::NamingRule::STATIC),
        Box::new(naming::NamingRule::VAR),
        Box::new(naming::NamingRule::FUNC),
        Box::new(spacing::OperatorSpacing),
        Box::new(spacing::CommaSpacing),
        Box::new(indent::IndentationConsistency),
        Box::new(single_line_if::SingleLineIf),
    ]
}

pub fn rule_ids() -> Vec<&'static str> {
    registry().iter().map(|r| r.id()).collect()
}

#[derive(Debug, Clone, Serialize)]
/// Public description of a registered rule.
pub struct RuleInfo {
    pub id: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

pub fn describe_rules() -> Vec<RuleInfo> {
    registry()
        .iter()
        .map(|r| RuleInfo {
            id: r.id(),
            severity: r.severity(),
            description: r.description(),
        })
        .collect()
}

/// Run every enabled rule and concatenate their diagnostics.
pub fn run_checks(ctx: &Context<'_>) -> Vec<Diagnostic> {
    registry()
        .iter()
        .filter(|r| ctx.options.is_enabled(r.id()))
        .flat_map(|r| r.check(ctx))
        .collect()
}

/// Keywords whose blocks are closed by `end`.
const STATEMENT_OPENERS: &[&str] = &["if", "while", "for", "func", "match"];
/// Declaration blocks (`struct Point:` ... `end`); they open only as headers.
const HEADER_OPENERS: &[&str] = &["struct", "enum", "impl", "trait", "extern"];

/// If the code token at `i` opens a block closed by `end`, its keyword.
///
/// `else if` continues a chain, `func(` is a function type, and inside
/// `extern`/`trait` blocks `func` lines are bodiless signatures.
pub(crate) fn opener_at(code: &[&Token], i: usize, in_signature_block: bool) -> Option<&'static str> {
    let tok = code[i];
    if let Some(kw) = STATEMENT_OPENERS.iter().find(|kw| tok.is_keyword(kw)) {
        let prev = i.checked_sub(1).map(|p| code[p]);
        return match *kw {
            "if" if prev.is_some_and(|p| p.is_keyword("else")) => None,
            "func" if in_signature_block => None,
            "func" if !code.get(i + 1).is_some_and(|n| n.kind == TokenKind::Identifier) => None,
            kw => Some(kw),
        };
    }
    let kw = HEADER_OPENERS.iter().find(|kw| tok.is_keyword(kw))?;
    let is_header_line = code.last().is_some_and(|t| t.is_punct(":"));
    let leads = code[..i].iter().all(|t| t.is_keyword("pub") || t.is_keyword("unsafe"));
    (is_header_line && leads).then_some(*kw)
}

/// Indices of the `<`/`>` tokens that bracket generic arguments, as in
/// `Option<int>` or `Map<Key, List<int>>`.
///
/// A `<` hugging a PascalCase name is generic only when a tight `>` closes it
/// on the same line with nothing but type names, commas and square brackets
/// in between. Anything else is a comparison.
pub(crate) fn generic_brackets(tokens: &[&Token]) -> BTreeSet<usize> {
    let mut found = BTreeSet::new();
    let mut i = 0;
    while i < tokens.len() {
        let close = if opens_generic(tokens, i) {
            generic_close(tokens, i)
        } else {
            None
        };
        if let Some(close) = close {
            found.extend((i..=close).filter(|&j| tokens[j].is_operator("<") || tokens[j].is_operator(">")));
            i = close + 1;
        } else {
            i += 1;
        }
    }
    found
}

fn opens_generic(tokens: &[&Token], i: usize) -> bool {
    let tok = tokens[i];
    let Some(prev) = i.checked_sub(1).map(|p| tokens[p]) else {
        return false;
    };
    tok.is_operator("<")
        && prev.kind == TokenKind::Identifier
        && prev.end_column() == tok.column
        && NamingStyle::classify(&prev.text) == NamingStyle::Pascal
        && tokens.get(i + 1).is_some_and(|n| n.column == tok.end_column())
}

fn generic_close(tokens: &[&Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (j, tok) in tokens.iter().enumerate().skip(open) {
        if tok.is_operator("<") {
            if !opens_generic(tokens, j) {
                return None;
            }
            depth += 1;
        } else if tok.is_operator(">") {
            if tokens[j - 1].end_column() != tok.column {
                return None;
            }
            depth -= 1;
            if depth == 0 {
                return Some(j);
            }
        } else if !(tok.kind == TokenKind::Identifier
            || tok.is_punct(",")
            || tok.is_punct("[")
            || tok.is_punct("]"))
        {
            return None;
        }
    }
    None
}
