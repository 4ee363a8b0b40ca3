//! Error types produced while compiling localization files.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use super::lexer::{Position, TokenKind};

/// Broad category of a [`CompileError`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// Malformed delimiter configuration.
    Lexical,
    /// Unexpected token or unterminated entry.
    Syntax,
    /// Duplicate keys, missing or circular embeds.
    Semantic,
    /// A declared file could not be read.
    Resource,
    /// A language does not provide the declared file set.
    Consistency,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical"),
            ErrorKind::Syntax => write!(f, "syntax"),
            ErrorKind::Semantic => write!(f, "semantic"),
            ErrorKind::Resource => write!(f, "resource"),
            ErrorKind::Consistency => write!(f, "consistency"),
        }
    }
}

/// Where a definition or a syntax error lives in the sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    pub file: String,
    pub position: Position,
}

impl Origin {
    pub fn new(file: impl Into<String>, position: Position) -> Self {
        Self {
            file: file.into(),
            position,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.position)
    }
}

/// Rejected delimiter configurations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelimiterError {
    #[error("{kind} delimiter must not be empty")]
    Empty { kind: TokenKind },
    #[error("{kind} delimiter must not contain a line break")]
    LineBreak { kind: TokenKind },
    #[error("{first} and {second} delimiters are both `{text}`")]
    Duplicate {
        first: TokenKind,
        second: TokenKind,
        text: String,
    },
    #[error("{prefix} delimiter `{prefix_text}` is a prefix of {longer} delimiter `{longer_text}`")]
    Prefix {
        prefix: TokenKind,
        prefix_text: String,
        longer: TokenKind,
        longer_text: String,
    },
    #[error("comment character must not be whitespace")]
    WhitespaceComment,
    #[error("comment character `{comment}` starts the {kind} delimiter")]
    CommentOverlap { comment: char, kind: TokenKind },
}

/// Any failure of the lexer/parser/resolver pipeline or of the facade that
/// drives it. A compile that returns one of these never publishes a codex.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid delimiters: {0}")]
    Delimiters(#[from] DelimiterError),

    #[error("{file}:{position}: {message}")]
    Syntax {
        file: String,
        position: Position,
        message: String,
    },

    #[error("duplicate key `{key}` (first declared at {first}, again at {second})")]
    DuplicateKey {
        key: String,
        first: Origin,
        second: Origin,
    },

    #[error("key `{key}` embeds `{missing}`, which is not defined")]
    MissingReference {
        key: String,
        origin: Option<Origin>,
        missing: String,
    },

    #[error("circular embed: {}", .cycle.join(" -> "))]
    CircularReference { cycle: Vec<String> },

    #[error("cannot read `{file}` ({}): {source}", .path.display())]
    Resource {
        file: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("language `{language}` is missing declared file(s): {}", .missing.join(", "))]
    Consistency {
        language: String,
        missing: Vec<String>,
    },
}

impl CompileError {
    pub(crate) fn syntax(file: &str, position: Position, message: impl Into<String>) -> Self {
        CompileError::Syntax {
            file: file.to_string(),
            position,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Delimiters(_) => ErrorKind::Lexical,
            CompileError::Syntax { .. } => ErrorKind::Syntax,
            CompileError::DuplicateKey { .. }
            | CompileError::MissingReference { .. }
            | CompileError::CircularReference { .. } => ErrorKind::Semantic,
            CompileError::Resource { .. } => ErrorKind::Resource,
            CompileError::Consistency { .. } => ErrorKind::Consistency,
        }
    }

    /// The source location most relevant to this error, if any.
    pub fn origin(&self) -> Option<Origin> {
        match self {
            CompileError::Syntax { file, position, .. } => Some(Origin::new(file, *position)),
            CompileError::DuplicateKey { second, .. } => Some(second.clone()),
            CompileError::MissingReference { origin, .. } => origin.clone(),
            _ => None,
        }
    }
}
