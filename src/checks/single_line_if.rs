//! Single-line versus multi-line `if`.
//!
//! `if cond then stmt end` on one line is accepted when the body holds at
//! most `max_if_statements` statements (separated by `;`), each of them
//! simple, and no `else`. A multi-line `if` must start its body on the line
//! after `then`.

use super::{opener_at, Context, Rule};
use crate::models::token::{Line, Token, TokenKind};
use crate::models::{Diagnostic, Severity};

const ASSIGNMENT_OPERATORS: &[&str] = &["=", "+=", "-=", "*=", "/="];
const BLOCK_KEYWORDS: &[&str] = &["if", "while", "for", "func", "match", "else"];

pub struct SingleLineIf;

/// `return [expr]`, `break`, `continue`, an assignment or a call.
pub fn is_simple_statement(stmt: &[&Token]) -> bool {
    let Some(first) = stmt.first() else {
        return false;
    };
    if stmt
        .iter()
        .any(|t| BLOCK_KEYWORDS.iter().any(|kw| t.is_keyword(kw)))
    {
        return false;
    }
    if first.is_keyword("return") {
        return true;
    }
    if first.is_keyword("break") || first.is_keyword("continue") {
        return stmt.len() == 1;
    }
    let starts_with_target = first.kind == TokenKind::Identifier
        || first.is_keyword("self")
        || first.is_keyword("var")
        || first.is_keyword("let");
    if !starts_with_target {
        return false;
    }
    let assigns = stmt
        .iter()
        .any(|t| t.kind == TokenKind::Operator && ASSIGNMENT_OPERATORS.contains(&t.text.as_str()));
    let calls = stmt.iter().any(|t| t.is_punct("(")) && stmt.last().is_some_and(|t| t.is_punct(")"));
    assigns || calls
}

impl SingleLineIf {
    fn check_line(&self, line: &Line, max: usize, out: &mut Vec<Diagnostic>) {
        let code: Vec<&Token> = line.code().collect();
        let mut i = 0;
        while i < code.len() {
            if !code[i].is_keyword("if") {
                i += 1;
                continue;
            }
            let chained = i > 0 && code[i - 1].is_keyword("else");
            let then_at = (i + 1..code.len()).find(|&j| code[j].is_keyword("then"));
            let Some(then_at) = then_at else {
                i += 1;
                continue;
            };
            let end_at = if chained {
                None
            } else {
                matching_end(&code, i)
            };
            match end_at {
                Some(end_at) if end_at > then_at => {
                    let body = &code[then_at + 1..end_at];
                    if let Some(message) = single_line_problem(body, max) {
                        out.push(self.diagnostic(message, code[i].line, code[i].column));
                    }
                    i = end_at + 1;
                }
                _ => {
                    // Multi-line form, or a branch of an `else if` chain.
                    if let Some(stmt) = code.get(then_at + 1) {
                        if !stmt.is_keyword("end") {
                            out.push(self.diagnostic(
                                "body of a multi-line if must start on a new line".to_string(),
                                stmt.line,
                                stmt.column,
                            ));
                        }
                    }
                    i = then_at + 1;
                }
            }
        }
    }
}

/// Index of the `end` closing the opener at `start`, on the same line.
fn matching_end(code: &[&Token], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for j in start..code.len() {
        if code[j].is_keyword("end") {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(j);
            }
        } else if opener_at(code, j, false).is_some() {
            depth += 1;
        }
    }
    None
}

fn single_line_problem(body: &[&Token], max: usize) -> Option<String> {
    if body.iter().any(|t| t.is_keyword("else")) {
        return Some("single-line if with an else branch must be written on multiple lines".into());
    }
    let statements: Vec<&[&Token]> = body
        .split(|t| t.is_punct(";"))
        .filter(|s| !s.is_empty())
        .collect();
    if statements.is_empty() {
        return Some("single-line if has an empty body".into());
    }
    if statements.len() > max {
        return Some(format!(
            "single-line if holds {} statements; at most {} allowed, use the multi-line form",
            statements.len(),
            max
        ));
    }
    if !statements.iter().all(|s| is_simple_statement(s)) {
        return Some(
            "single-line if body must be a simple statement (return, assignment or call)".into(),
        );
    }
    None
}

impl Rule for SingleLineIf {
    fn id(&self) -> &'static str {
        "single-vs-multiline-if"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "single-line if only for one simple statement; otherwise use the multi-line form"
    }

    fn check(&self, ctx: &Context<'_>) -> Vec<Diagnostic> {
        let max = ctx.options.max_if_statements;
        let mut out = Vec::new();
        for line in ctx.lines {
            self.check_line(line, max, &mut out);
        }
        out
    }
}
