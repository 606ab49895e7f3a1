//! Token and line shapes produced by the tokenizer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    StringLiteral,
    Comment,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A lexical unit with its 1-based position. `column` counts characters.
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// Width in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    /// Column just past the last character.
    pub fn end_column(&self) -> usize {
        self.column + self.width()
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_punct(&self, ch: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == ch
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// True for tokens that can end an operand: names, literals, closing brackets.
    pub fn is_operand(&self) -> bool {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::StringLiteral => true,
            TokenKind::Keyword => matches!(self.text.as_str(), "true" | "false" | "none" | "self"),
            TokenKind::Punctuation => matches!(self.text.as_str(), ")" | "]"),
            TokenKind::Operator | TokenKind::Comment => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Which whitespace characters make up a line's indentation.
pub enum IndentStyle {
    None,
    Spaces,
    Tabs,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indent {
    /// Number of leading whitespace characters.
    pub width: usize,
    pub style: IndentStyle,
}

impl Indent {
    pub fn of(text: &str) -> Self {
        let mut width = 0;
        let mut spaces = false;
        let mut tabs = false;
        for ch in text.chars() {
            match ch {
                ' ' => spaces = true,
                '\t' => tabs = true,
                _ => break,
            }
            width += 1;
        }
        let style = match (spaces, tabs) {
            (false, false) => IndentStyle::None,
            (true, false) => IndentStyle::Spaces,
            (false, true) => IndentStyle::Tabs,
            (true, true) => IndentStyle::Mixed,
        };
        Indent { width, style }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One tokenized source line.
pub struct Line {
    pub number: usize,
    pub text: String,
    pub indent: Indent,
    pub tokens: Vec<Token>,
}

impl Line {
    /// Tokens that carry code, i.e. everything except comments.
    pub fn code(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.kind != TokenKind::Comment)
    }

    pub fn has_code(&self) -> bool {
        self.code().next().is_some()
    }

    /// Raw text strictly between the end of `a` and the start of `b`.
    pub fn gap(&self, a: &Token, b: &Token) -> String {
        let start = a.end_column().saturating_sub(1);
        let end = b.column.saturating_sub(1);
        if end <= start {
            return String::new();
        }
        self.text.chars().skip(start).take(end - start).collect()
    }
}
