//! Block indentation.
//!
//! Blocks are opened by `if`, `while`, `for`, `func` and `match` (and by
//! `struct`/`enum`/`impl`/`trait`/`extern` header lines ending in `:`) and
//! closed by `end`. Body lines sit one unit deeper than their opener; `end`
//! and `else` align with it. In a `match`, `case`/`default` headers sit one
//! unit deeper and their statements two.
//!
//! Lines inside an open bracket or following a trailing operator are
//! continuations and are not checked. Blank and comment-only lines are
//! skipped.

use super::{generic_brackets, opener_at, Context, IndentMode, Rule, DEFAULT_INDENT_WIDTH};
use crate::models::token::{IndentStyle, Line, Token, TokenKind};
use crate::models::{Diagnostic, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Spaces(usize),
    Tab,
}

struct Frame {
    level: usize,
    kind: &'static str,
    in_clause: bool,
}

pub struct IndentationConsistency;

impl IndentationConsistency {
    /// Indentation of `line` in units, or `None` when it cannot be measured
    /// (a diagnostic has then been pushed). Without an explicit `width` the
    /// first space-indented line sets the number of spaces per level.
    fn measure(
        &self,
        line: &Line,
        unit: &mut Option<Unit>,
        width: Option<usize>,
        out: &mut Vec<Diagnostic>,
    ) -> Option<usize> {
        let indent = line.indent;
        let found = match indent.style {
            IndentStyle::None => return Some(0),
            IndentStyle::Mixed => {
                out.push(self.diagnostic(
                    "indentation mixes tabs and spaces".to_string(),
                    line.number,
                    1,
                ));
                return None;
            }
            IndentStyle::Tabs => Unit::Tab,
            IndentStyle::Spaces => Unit::Spaces(width.unwrap_or(indent.width)),
        };
        let unit = *unit.get_or_insert(found);
        let message = match (unit, found) {
            (Unit::Tab, Unit::Tab) => return Some(indent.width),
            (Unit::Spaces(n), Unit::Spaces(_)) if indent.width % n == 0 => {
                return Some(indent.width / n)
            }
            (Unit::Spaces(n), Unit::Spaces(_)) => format!(
                "indentation of {} spaces is not a multiple of {}",
                indent.width, n
            ),
            (Unit::Tab, Unit::Spaces(_)) => {
                "indented with spaces but this file indents with tabs".to_string()
            }
            (Unit::Spaces(_), Unit::Tab) => {
                "indented with tabs but this file indents with spaces".to_string()
            }
        };
        out.push(self.diagnostic(message, line.number, 1));
        None
    }
}

fn describe(levels: usize, unit: Option<Unit>) -> String {
    match unit {
        Some(Unit::Spaces(n)) => plural(levels * n, "space"),
        Some(Unit::Tab) => plural(levels, "tab"),
        None => plural(levels, "level"),
    }
}

fn plural(n: usize, what: &str) -> String {
    if n == 1 {
        format!("1 {}", what)
    } else {
        format!("{} {}s", n, what)
    }
}

/// Net bracket depth change over a line's code tokens.
fn bracket_delta(code: &[&Token]) -> isize {
    code.iter()
        .map(|t| match t.text.as_str() {
            "(" | "[" | "{" if t.kind == TokenKind::Punctuation => 1,
            ")" | "]" | "}" if t.kind == TokenKind::Punctuation => -1,
            _ => 0,
        })
        .sum()
}

impl Rule for IndentationConsistency {
    fn id(&self) -> &'static str {
        "indentation-consistency"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "blocks indent by exactly one unit of a single kind; end aligns with its opener"
    }

    fn check(&self, ctx: &Context<'_>) -> Vec<Diagnostic> {
        let width = ctx.options.indent_width.map(|w| w.max(1));
        let mut unit = match ctx.options.indent_mode {
            IndentMode::Auto => None,
            IndentMode::Spaces => Some(Unit::Spaces(width.unwrap_or(DEFAULT_INDENT_WIDTH))),
            IndentMode::Tabs => Some(Unit::Tab),
        };
        let mut out = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut depth: isize = 0;
        let mut continues = false;

        for line in ctx.lines {
            let code: Vec<&Token> = line.code().collect();
            let Some(first) = code.first() else {
                continue;
            };
            let continuation = depth > 0 || continues;
            depth = (depth + bracket_delta(&code)).max(0);
            let generics = generic_brackets(&code);
            continues = code
                .last()
                .is_some_and(|t| t.kind == TokenKind::Operator && !generics.contains(&(code.len() - 1)));
            if continuation {
                continue;
            }

            let level = self.measure(line, &mut unit, width, &mut out);
            let top = stack.last();
            let is_end = first.is_keyword("end");
            let is_clause = (first.is_keyword("case") || first.is_keyword("default"))
                && top.is_some_and(|f| f.kind == "match");
            let expected = if is_end || first.is_keyword("else") {
                top.map_or(0, |f| f.level)
            } else if is_clause {
                top.map_or(0, |f| f.level + 1)
            } else {
                top.map_or(0, |f| f.level + 1 + usize::from(f.in_clause))
            };

            if let Some(found) = level {
                if found != expected {
                    out.push(self.diagnostic(
                        format!(
                            "expected indentation of {} but found {}",
                            describe(expected, unit),
                            describe(found, unit)
                        ),
                        line.number,
                        1,
                    ));
                }
            }

            if is_clause {
                if let Some(f) = stack.last_mut() {
                    f.in_clause = true;
                }
            }
            let here = level.unwrap_or(expected);
            let signatures_only = stack
                .last()
                .is_some_and(|f| f.kind == "extern" || f.kind == "trait");
            for i in 0..code.len() {
                if code[i].is_keyword("end") {
                    stack.pop();
                } else if let Some(kind) = opener_at(&code, i, signatures_only) {
                    stack.push(Frame {
                        level: here,
                        kind,
                        in_clause: false,
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{check, check_with};
    use crate::checks::LintOptions;

    fn lines_of(diags: &[Diagnostic]) -> Vec<usize> {
        diags.iter().map(|d| d.line).collect()
    }

    #[test]
    fn test_unindented_body_flagged_at_body_line() {
        let diags = check(&IndentationConsistency, "if x then\ny = 1\nend");
        assert_eq!(lines_of(&diags), vec![2]);
        assert_eq!(diags[0].column, 1);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn test_one_unit_body_is_clean() {
        assert!(check(&IndentationConsistency, "if x then\n    y = 1\nend").is_empty());
    }

    #[test]
    fn test_over_indented_body() {
        let src = "if x then\n    y = 1\nend\nif x then\n        y = 1\nend";
        let diags = check(&IndentationConsistency, src);
        assert_eq!(lines_of(&diags), vec![5]);
        assert_eq!(
            diags[0].message,
            "expected indentation of 4 spaces but found 8 spaces"
        );
    }

    #[test]
    fn test_end_must_align_with_opener() {
        let diags = check(&IndentationConsistency, "if x then\n    y = 1\n    end");
        assert_eq!(lines_of(&diags), vec![3]);
    }

    #[test]
    fn test_nested_blocks_with_tabs() {
        let src = "func main()\n\tif x then\n\t\treturn 1\n\tend\nend";
        assert!(check(&IndentationConsistency, src).is_empty());
    }

    #[test]
    fn test_unit_kind_fixed_by_first_indented_line() {
        let src = "func a()\n    x = 1\nend\nfunc b()\n\ty = 2\nend";
        let diags = check(&IndentationConsistency, src);
        assert_eq!(lines_of(&diags), vec![5]);
        assert!(diags[0].message.contains("indented with tabs"));
    }

    #[test]
    fn test_mixed_and_partial_units() {
        let diags = check(&IndentationConsistency, "func a()\n \tx = 1\nend");
        assert_eq!(diags[0].message, "indentation mixes tabs and spaces");

        let options = LintOptions {
            indent_width: Some(4),
            ..LintOptions::default()
        };
        let diags = check_with(&IndentationConsistency, "func a()\n  x = 1\nend", &options);
        assert_eq!(
            diags[0].message,
            "indentation of 2 spaces is not a multiple of 4"
        );
    }

    #[test]
    fn test_configured_width() {
        let options = LintOptions {
            indent_width: Some(2),
            ..LintOptions::default()
        };
        let src = "func a()\n  if x then\n    y = 1\n  end\nend";
        assert!(check_with(&IndentationConsistency, src, &options).is_empty());
    }

    #[test]
    fn test_auto_mode_infers_space_width() {
        let src = "func f()\n  x = 1\n  if x then\n    y = 2\n  end\nend";
        assert!(check(&IndentationConsistency, src).is_empty());

        let diags = check(&IndentationConsistency, "func f()\n  x = 1\n   y = 2\nend");
        assert_eq!(lines_of(&diags), vec![3]);
        assert_eq!(
            diags[0].message,
            "indentation of 3 spaces is not a multiple of 2"
        );
    }

    #[test]
    fn test_spaces_mode_without_width_uses_default() {
        let options = LintOptions {
            indent_mode: IndentMode::Spaces,
            ..LintOptions::default()
        };
        let diags = check_with(&IndentationConsistency, "func f()\n  x = 1\nend", &options);
        assert_eq!(lines_of(&diags), vec![2]);
    }

    #[test]
    fn test_generic_return_type_is_not_a_continuation() {
        let diags = check(&IndentationConsistency, "func get() -> Option<int>\nx = 1\nend");
        assert_eq!(lines_of(&diags), vec![2]);
        assert!(check(&IndentationConsistency, "func get() -> Option<int>\n    x = 1\nend").is_empty());
    }

    #[test]
    fn test_configured_tabs_mode_rejects_spaces() {
        let options = LintOptions {
            indent_mode: IndentMode::Tabs,
            ..LintOptions::default()
        };
        let diags = check_with(&IndentationConsistency, "func a()\n    x = 1\nend", &options);
        assert_eq!(lines_of(&diags), vec![2]);
    }

    #[test]
    fn test_else_and_else_if_align_with_if() {
        let src = "if a then\n    x = 1\nelse if b then\n    x = 2\nelse\n    x = 3\nend";
        assert!(check(&IndentationConsistency, src).is_empty());
    }

    #[test]
    fn test_match_cases() {
        let src = "match v:\n    case 1:\n        x = 1\n    default:\n        x = 2\nend";
        assert!(check(&IndentationConsistency, src).is_empty());
    }

    #[test]
    fn test_declaration_blocks() {
        let src = "struct Point:\n    x: int\n    y: int\nend\n\
                   extern \"C\":\n    func puts(s: str) -> int\nend\nz = 1";
        assert!(check(&IndentationConsistency, src).is_empty());
    }

    #[test]
    fn test_loops_and_single_line_blocks() {
        let src = "func f(items)\n    for i in items do\n        if i == 0 then continue end\n        print(i)\n    end\n    while busy() do\n        wait()\n    end\nend";
        assert!(check(&IndentationConsistency, src).is_empty());
    }

    #[test]
    fn test_continuations_and_comments_skipped() {
        let src = "func f()\n\n// note\n    call(a,\n            b)\n    total = a +\n          b\nend";
        assert!(check(&IndentationConsistency, src).is_empty());
    }
}
