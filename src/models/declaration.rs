//! Declarations introduced by `const`, `static`, `var` and `func`, and the
//! naming-style classifier applied to their names.

use crate::models::token::{Line, TokenKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Constant,
    Static,
    Variable,
    Function,
}

impl DeclKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "const" => Some(DeclKind::Constant),
            "static" => Some(DeclKind::Static),
            "var" => Some(DeclKind::Variable),
            "func" => Some(DeclKind::Function),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DeclKind::Constant => "const",
            DeclKind::Static => "static",
            DeclKind::Variable => "var",
            DeclKind::Function => "func",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    UpperSnake,
    LowerSnake,
    Pascal,
    Camel,
    Mixed,
}

impl NamingStyle {
    /// Classify an identifier. Pure function of the text.
    pub fn classify(name: &str) -> Self {
        let mut letters = name.chars().filter(|c| c.is_alphabetic()).peekable();
        let first = match letters.peek() {
            Some(c) => *c,
            None => return NamingStyle::Mixed,
        };
        let letters: Vec<char> = letters.collect();
        let has_underscore = name.contains('_');
        if letters.iter().all(|c| c.is_uppercase()) {
            NamingStyle::UpperSnake
        } else if letters.iter().all(|c| c.is_lowercase()) {
            NamingStyle::LowerSnake
        } else if has_underscore {
            NamingStyle::Mixed
        } else if first.is_lowercase() {
            NamingStyle::Camel
        } else {
            NamingStyle::Pascal
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NamingStyle::UpperSnake => "UPPER_SNAKE_CASE",
            NamingStyle::LowerSnake => "snake_case",
            NamingStyle::Pascal => "PascalCase",
            NamingStyle::Camel => "camelCase",
            NamingStyle::Mixed => "mixed case",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A named binding. Position points at the name.
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    pub style: NamingStyle,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A declaring keyword with no name after it. Position points at the keyword.
pub struct UnnamedDeclaration {
    pub kind: DeclKind,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub named: Vec<Declaration>,
    pub unnamed: Vec<UnnamedDeclaration>,
}

impl Declarations {
    /// Collect declarations from tokenized lines.
    ///
    /// The name is the identifier right after the declaring keyword, with an
    /// optional `mut` in between. Anything else after the keyword, except
    /// the `(` of a function type, makes the declaration unnamed.
    pub fn scan(lines: &[Line]) -> Self {
        let mut out = Declarations::default();
        for line in lines {
            let code: Vec<_> = line.code().collect();
            for (i, tok) in code.iter().enumerate() {
                if tok.kind != TokenKind::Keyword {
                    continue;
                }
                let Some(kind) = DeclKind::from_keyword(&tok.text) else {
                    continue;
                };
                let mut next = code.get(i + 1);
                if next.is_some_and(|t| t.is_keyword("mut")) {
                    next = code.get(i + 2);
                }
                match next {
                    Some(name) if name.kind == TokenKind::Identifier => {
                        out.named.push(Declaration {
                            name: name.text.clone(),
                            kind,
                            style: NamingStyle::classify(&name.text),
                            line: name.line,
                            column: name.column,
                        });
                    }
                    // `func(int) -> int` is a function type, not a declaration.
                    Some(open) if kind == DeclKind::Function && open.is_punct("(") => {}
                    _ => out.unnamed.push(UnnamedDeclaration {
                        kind,
                        line: tok.line,
                        column: tok.column,
                    }),
                }
            }
        }
        out
    }

    pub fn of_kind(&self, kind: DeclKind) -> impl Iterator<Item = &Declaration> + '_ {
        self.named.iter().filter(move |d| d.kind == kind)
    }

    pub fn unnamed_of_kind(&self, kind: DeclKind) -> impl Iterator<Item = &UnnamedDeclaration> + '_ {
        self.unnamed.iter().filter(move |d| d.kind == kind)
    }
}
