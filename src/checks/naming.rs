//! Naming rules for `const`, `static`, `var` and `func` declarations.

use super::{Context, Rule};
use crate::models::declaration::{DeclKind, Declaration, NamingStyle};
use crate::models::{Diagnostic, Severity};

/// One naming rule per declaration kind; they differ only in data.
pub struct NamingRule {
    id: &'static str,
    kind: DeclKind,
    expected: NamingStyle,
    severity: Severity,
    description: &'static str,
}

impl NamingRule {
    pub const CONST: NamingRule = NamingRule {
        id: "const-naming",
        kind: DeclKind::Constant,
        expected: NamingStyle::UpperSnake,
        severity: Severity::Error,
        description: "const names use UPPER_SNAKE_CASE",
    };

    pub const STATIC: NamingRule = NamingRule {
        id: "static-naming",
        kind: DeclKind::Static,
        expected: NamingStyle::UpperSnake,
        severity: Severity::Error,
        description: "static names use UPPER_SNAKE_CASE",
    };

    pub const VAR: NamingRule = NamingRule {
        id: "var-naming",
        kind: DeclKind::Variable,
        expected: NamingStyle::LowerSnake,
        severity: Severity::Warning,
        description: "var names use snake_case, never constant-like or camel/Pascal case",
    };

    pub const FUNC: NamingRule = NamingRule {
        id: "func-naming",
        kind: DeclKind::Function,
        expected: NamingStyle::LowerSnake,
        severity: Severity::Warning,
        description: "func names use snake_case",
    };

    fn message(&self, decl: &Declaration) -> String {
        let name = &decl.name;
        match (self.kind, decl.style) {
            (DeclKind::Variable, NamingStyle::UpperSnake) => format!(
                "\"{}\" looks like a constant; variables use snake_case",
                name
            ),
            (DeclKind::Variable, NamingStyle::Camel | NamingStyle::Pascal) => {
                format!("\"{}\" is {}; variables use snake_case", name, decl.style)
            }
            (DeclKind::Variable, _) => {
                format!("\"{}\" mixes naming styles; variables use snake_case", name)
            }
            _ => format!("\"{}\" is not {}", name, self.expected),
        }
    }
}

impl Rule for NamingRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn check(&self, ctx: &Context<'_>) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for unnamed in ctx.declarations.unnamed_of_kind(self.kind) {
            out.push(self.diagnostic(
                format!(
                    "\"{}\" declaration has no identifiable name",
                    self.kind.keyword()
                ),
                unnamed.line,
                unnamed.column,
            ));
        }
        let pattern = ctx.options.naming_patterns.get(&self.kind);
        for decl in ctx.declarations.of_kind(self.kind) {
            let message = match pattern {
                Some(re) if re.is_match(&decl.name) => continue,
                Some(re) => format!(
                    "\"{}\" does not match the configured pattern `{}`",
                    decl.name,
                    re.as_str()
                ),
                None if decl.style == self.expected => continue,
                None => self.message(decl),
            };
            out.push(self.diagnostic(message, decl.line, decl.column));
        }
        out
    }
}
