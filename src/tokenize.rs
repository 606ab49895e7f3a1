//! Line tokenizer for style checks.
//!
//! This is not a full Vix lexer: it recognizes just enough structure for the
//! checks (identifiers, keywords, operators, punctuation, numbers, opaque
//! string literals and comments) and records each line's indentation.
//!
//! Comment forms:
//! - `// text` runs to the end of the line.
//! - `/ text /` is an enclosed comment. A `/` only opens one when it cannot be
//!   a division (start of line, or not preceded by an operand) and a closing
//!   `/` follows on the same line.

use crate::models::token::{Indent, Line, Token, TokenKind};
use thiserror::Error;

/// Reserved words of the Vix language.
pub const KEYWORDS: &[&str] = &[
    "const", "static", "var", "let", "mut", "func", "return", "if", "then", "else", "end",
    "while", "do", "for", "in", "break", "continue", "match", "case", "default", "struct",
    "enum", "impl", "trait", "module", "mod", "import", "from", "use", "pub", "extern", "type",
    "unsafe", "and", "or", "not", "true", "false", "none", "self",
];

const TWO_CHAR_OPERATORS: &[&str] = &["==", "!=", ">=", "<=", "->", "+=", "-=", "*=", "/=", ".."];
const OPERATOR_CHARS: &str = "=+-*/%<>!&|^~";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated string literal")]
    UnterminatedString { line: usize, column: usize },
}

impl TokenizeError {
    pub fn position(&self) -> (usize, usize) {
        match self {
            TokenizeError::UnterminatedString { line, column } => (*line, *column),
        }
    }
}

/// All lines of a file. Lines that failed to tokenize keep their
/// indentation but carry no tokens; the failure is listed in `errors`.
#[derive(Debug, Clone, Default)]
pub struct Tokenized {
    pub lines: Vec<Line>,
    pub errors: Vec<TokenizeError>,
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Tokenize a whole source text, recovering line by line.
pub fn tokenize(source: &str) -> Tokenized {
    let mut out = Tokenized::default();
    for (idx, text) in source.lines().enumerate() {
        let number = idx + 1;
        match tokenize_line(number, text) {
            Ok(line) => out.lines.push(line),
            Err(e) => {
                out.errors.push(e);
                out.lines.push(Line {
                    number,
                    text: text.to_string(),
                    indent: Indent::of(text),
                    tokens: Vec::new(),
                });
            }
        }
    }
    out
}

/// Tokenize one line. `number` is the 1-based line number.
pub fn tokenize_line(number: usize, text: &str) -> Result<Line, TokenizeError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == ' ' || c == '\t' {
            i += 1;
            continue;
        }
        let start = i;
        let push = |tokens: &mut Vec<Token>, kind: TokenKind, end: usize| {
            tokens.push(Token {
                kind,
                text: chars[start..end].iter().collect(),
                line: number,
                column: start + 1,
            });
        };

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            push(&mut tokens, TokenKind::Comment, chars.len());
            break;
        }
        if c == '/' && tokens.last().map_or(true, |t| !t.is_operand()) {
            if let Some(close) = chars[i + 1..].iter().position(|&ch| ch == '/') {
                let end = i + 1 + close + 1;
                push(&mut tokens, TokenKind::Comment, end);
                i = end;
                continue;
            }
        }

        if c == '"' {
            let mut j = i + 1;
            let mut closed = false;
            while j < chars.len() {
                match chars[j] {
                    '\\' => j += 2,
                    '"' => {
                        closed = true;
                        j += 1;
                        break;
                    }
                    _ => j += 1,
                }
            }
            if !closed {
                return Err(TokenizeError::UnterminatedString {
                    line: number,
                    column: start + 1,
                });
            }
            push(&mut tokens, TokenKind::StringLiteral, j);
            i = j;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut j = i + 1;
            while j < chars.len() && (chars[j].is_alphanumeric() || chars[j] == '_') {
                j += 1;
            }
            let word: String = chars[start..j].iter().collect();
            let kind = if is_keyword(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            push(&mut tokens, kind, j);
            i = j;
            continue;
        }

        if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < chars.len() {
                let ch = chars[j];
                let fraction = ch == '.' && chars.get(j + 1).is_some_and(|n| n.is_ascii_digit());
                if ch.is_alphanumeric() || ch == '_' || fraction {
                    j += 1;
                } else {
                    break;
                }
            }
            push(&mut tokens, TokenKind::Number, j);
            i = j;
            continue;
        }

        if let Some(&next) = chars.get(i + 1) {
            let pair: String = [c, next].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                push(&mut tokens, TokenKind::Operator, i + 2);
                i += 2;
                continue;
            }
        }

        // Anything else, including characters Vix does not use, is punctuation.
        let kind = if OPERATOR_CHARS.contains(c) {
            TokenKind::Operator
        } else {
            TokenKind::Punctuation
        };
        push(&mut tokens, kind, i + 1);
        i += 1;
    }

    Ok(Line {
        number,
        text: text.to_string(),
        indent: Indent::of(text),
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::IndentStyle;

    fn kinds(line: &Line) -> Vec<(TokenKind, &str)> {
        line.tokens
            .iter()
            .map(|t| (t.kind, t.text.as_str()))
            .collect()
    }

    #[test]
    fn test_declaration_line() {
        let line = tokenize_line(1, "const maxUsers=100").unwrap();
        assert_eq!(
            kinds(&line),
            vec![
                (TokenKind::Keyword, "const"),
                (TokenKind::Identifier, "maxUsers"),
                (TokenKind::Operator, "="),
                (TokenKind::Number, "100"),
            ]
        );
        assert_eq!(line.tokens[1].column, 7);
        assert_eq!(line.tokens[2].column, 15);
    }

    #[test]
    fn test_two_char_operators() {
        let line = tokenize_line(1, "if a>=b then x == y end").unwrap();
        let ops: Vec<_> = line
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(ops, vec![">=", "=="]);
    }

    #[test]
    fn test_strings_are_opaque() {
        let line = tokenize_line(3, r#"var s = "a=b, \"c\"" // note"#).unwrap();
        assert_eq!(line.tokens[3].kind, TokenKind::StringLiteral);
        assert_eq!(line.tokens[3].text, r#""a=b, \"c\"""#);
        assert_eq!(line.tokens[4].kind, TokenKind::Comment);
        assert_eq!(line.tokens.len(), 5);
    }

    #[test]
    fn test_enclosed_comment_vs_division() {
        let line = tokenize_line(1, "/ header comment /").unwrap();
        assert_eq!(kinds(&line), vec![(TokenKind::Comment, "/ header comment /")]);

        let line = tokenize_line(1, "x = a / b / c").unwrap();
        let slashes = line.tokens.iter().filter(|t| t.is_operator("/")).count();
        assert_eq!(slashes, 2);

        let line = tokenize_line(1, "x = 1 / inline note /").unwrap();
        assert!(line.tokens.iter().all(|t| t.kind != TokenKind::Comment));

        let line = tokenize_line(1, "x = / inline note / 1").unwrap();
        assert_eq!(line.tokens[2].kind, TokenKind::Comment);
        assert_eq!(line.tokens[3].text, "1");
    }

    #[test]
    fn test_numbers() {
        let line = tokenize_line(1, "f(3.14, 0x1F, 1_000)").unwrap();
        let nums: Vec<_> = line
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(nums, vec!["3.14", "0x1F", "1_000"]);
    }

    #[test]
    fn test_unterminated_string_recovers_on_next_line() {
        let out = tokenize("var a = \"oops\nvar b = 1\n");
        assert_eq!(
            out.errors,
            vec![TokenizeError::UnterminatedString { line: 1, column: 9 }]
        );
        assert_eq!(out.lines.len(), 2);
        assert!(out.lines[0].tokens.is_empty());
        assert_eq!(out.lines[1].tokens.len(), 4);
    }

    #[test]
    fn test_indent_metadata() {
        let out = tokenize("if x then\n\treturn 1\nend");
        assert_eq!(out.lines[1].indent.style, IndentStyle::Tabs);
        assert_eq!(out.lines[1].indent.width, 1);
        assert_eq!(out.lines[1].tokens[0].column, 2);
    }

    #[test]
    fn test_empty_source() {
        let out = tokenize("");
        assert!(out.lines.is_empty());
        assert!(out.errors.is_empty());
    }
}
