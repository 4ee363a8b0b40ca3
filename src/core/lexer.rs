//! Lexer turning localization source text into delimiter tokens.
//!
//! The lexer only classifies characters: it knows the eight delimiters of a
//! [`Delimiters`] set and treats everything else as literal text. Nesting and
//! termination are the parser's concern, so tokenizing never fails.

use std::fmt;

use super::delimiters::Delimiters;

/// Kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenLabel,
    CloseLabel,
    OpenValue,
    CloseValue,
    OpenVar,
    CloseVar,
    OpenEmbed,
    CloseEmbed,
    Literal,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::OpenLabel => "open-label",
            TokenKind::CloseLabel => "close-label",
            TokenKind::OpenValue => "open-value",
            TokenKind::CloseValue => "close-value",
            TokenKind::OpenVar => "open-var",
            TokenKind::CloseVar => "close-var",
            TokenKind::OpenEmbed => "open-embed",
            TokenKind::CloseEmbed => "close-embed",
            TokenKind::Literal => "literal",
        };
        f.write_str(name)
    }
}

/// 1-based line and column (in characters) of a token in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text, or the delimiter text for delimiter tokens.
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is_blank_literal(&self) -> bool {
        self.kind == TokenKind::Literal && self.text.trim().is_empty()
    }
}

/// Tokenize `text` with the given delimiters.
///
/// Lines whose first non-whitespace character is the comment character are
/// dropped together with their line break. Positions still refer to the
/// original line numbers.
pub fn tokenize(text: &str, delimiters: &Delimiters) -> Vec<Token> {
    let table = delimiters.table();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut literal_start = Position::default();

    let flush_literal = |literal: &mut String, start: Position, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            tokens.push(Token::new(TokenKind::Literal, std::mem::take(literal), start));
        }
    };

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let line_number = index + 1;
        if line.trim_start().starts_with(delimiters.comment) {
            continue;
        }

        let mut rest = line;
        let mut column = 1;
        while let Some(ch) = rest.chars().next() {
            let position = Position::new(line_number, column);
            let matched = table
                .iter()
                .filter(|(_, delimiter)| !delimiter.is_empty() && rest.starts_with(delimiter))
                .max_by_key(|(_, delimiter)| delimiter.len());

            match matched {
                Some((kind, delimiter)) => {
                    flush_literal(&mut literal, literal_start, &mut tokens);
                    tokens.push(Token::new(*kind, *delimiter, position));
                    rest = &rest[delimiter.len()..];
                    column += delimiter.chars().count();
                }
                None => {
                    if literal.is_empty() {
                        literal_start = position;
                    }
                    literal.push(ch);
                    rest = &rest[ch.len_utf8()..];
                    column += 1;
                }
            }
        }
    }

    flush_literal(&mut literal, literal_start, &mut tokens);
    tokens
}

/// Position just past the last character of `text`, used for end-of-file
/// diagnostics.
pub fn end_position(text: &str) -> Position {
    let line = text.split('\n').count();
    let column = text.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    Position::new(line, column)
}
