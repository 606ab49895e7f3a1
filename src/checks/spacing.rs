//! Whitespace around binary operators and commas.
//!
//! Only neighbouring tokens on the same line are compared, so strings and
//! comments never contribute operators or commas of their own.

use super::{generic_brackets, Context, Rule};
use crate::models::token::{Line, Token, TokenKind};
use crate::models::{Diagnostic, Severity};

const SPACED_OPERATORS: &[&str] = &["=", "+", "-", "*", "/", "==", "!=", ">=", "<=", ">", "<"];

pub struct OperatorSpacing;

impl OperatorSpacing {
    fn check_line(&self, line: &Line, out: &mut Vec<Diagnostic>) {
        let tokens = &line.tokens;
        let refs: Vec<&Token> = tokens.iter().collect();
        let generics = generic_brackets(&refs);
        for (i, op) in tokens.iter().enumerate() {
            if op.kind != TokenKind::Operator || !SPACED_OPERATORS.contains(&op.text.as_str()) {
                continue;
            }
            if generics.contains(&i) {
                continue;
            }
            // Leading operators are unary or continue the previous line.
            let Some(prev) = i.checked_sub(1).map(|p| &tokens[p]) else {
                continue;
            };
            if prev.kind == TokenKind::Comment {
                continue;
            }
            if op.text != "=" && !prev.is_operand() {
                continue;
            }
            let next = tokens.get(i + 1).filter(|t| t.kind != TokenKind::Comment);
            let before = line.gap(prev, op);
            let after = next.map(|n| line.gap(op, n));

            let before_ok = before == " ";
            let after_ok = after.as_deref().map_or(true, |g| g == " ");
            if before_ok && after_ok {
                continue;
            }
            let before_missing = before.is_empty();
            let after_missing = after.as_deref() == Some("");
            let message = if before_missing && after_missing {
                format!("missing spaces around \"{}\"", op.text)
            } else if before_missing && after_ok {
                format!("missing space before \"{}\"", op.text)
            } else if after_missing && before_ok {
                format!("missing space after \"{}\"", op.text)
            } else {
                format!("expected exactly one space around \"{}\"", op.text)
            };
            out.push(self.diagnostic(message, op.line, op.column));
        }
    }
}

impl Rule for OperatorSpacing {
    fn id(&self) -> &'static str {
        "operator-spacing"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "binary operators have exactly one space on each side"
    }

    fn check(&self, ctx: &Context<'_>) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for line in ctx.lines {
            self.check_line(line, &mut out);
        }
        out
    }
}

pub struct CommaSpacing;

impl CommaSpacing {
    fn check_line(&self, line: &Line, out: &mut Vec<Diagnostic>) {
        let tokens = &line.tokens;
        for (i, comma) in tokens.iter().enumerate() {
            if !comma.is_punct(",") {
                continue;
            }
            if let Some(prev) = i.checked_sub(1).map(|p| &tokens[p]) {
                if !line.gap(prev, comma).is_empty() {
                    out.push(self.diagnostic(
                        "unexpected space before \",\"".to_string(),
                        comma.line,
                        comma.column,
                    ));
                }
            }
            let Some(next) = tokens.get(i + 1) else {
                continue;
            };
            if next.kind == TokenKind::Comment || is_closing(next) {
                continue;
            }
            let gap = line.gap(comma, next);
            if gap.is_empty() {
                out.push(self.diagnostic(
                    "missing space after \",\"".to_string(),
                    comma.line,
                    comma.column,
                ));
            } else if gap != " " {
                out.push(self.diagnostic(
                    "expected exactly one space after \",\"".to_string(),
                    comma.line,
                    comma.column,
                ));
            }
        }
    }
}

fn is_closing(tok: &Token) -> bool {
    tok.is_punct(")") || tok.is_punct("]") || tok.is_punct("}")
}

impl Rule for CommaSpacing {
    fn id(&self) -> &'static str {
        "comma-spacing"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "commas have no space before and exactly one space after"
    }

    fn check(&self, ctx: &Context<'_>) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for line in ctx.lines {
            self.check_line(line, &mut out);
        }
        out
    }
}
