//! Issue types reported by the CLI.
//!
//! Compile errors become error issues; key parity between the primary
//! language and the others produces warnings.

use std::{cmp::Ordering, fmt};

use crate::core::{CompileError, Origin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    Delimiters,
    Syntax,
    DuplicateKey,
    MissingEmbed,
    CircularEmbed,
    UnreadableFile,
    FileSet,
    MissingTranslation,
    OrphanKey,
}

impl Rule {
    pub fn severity(self) -> Severity {
        match self {
            Rule::MissingTranslation | Rule::OrphanKey => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Delimiters => "delimiters",
            Rule::Syntax => "syntax",
            Rule::DuplicateKey => "duplicate-key",
            Rule::MissingEmbed => "missing-embed",
            Rule::CircularEmbed => "circular-embed",
            Rule::UnreadableFile => "unreadable-file",
            Rule::FileSet => "file-set",
            Rule::MissingTranslation => "missing-translation",
            Rule::OrphanKey => "orphan-key",
        };
        f.write_str(name)
    }
}

/// File position an issue points at. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl From<&Origin> for IssueLocation {
    fn from(origin: &Origin) -> Self {
        Self {
            file: origin.file.clone(),
            line: origin.position.line,
            column: origin.position.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub rule: Rule,
    /// Language whose sources produced the issue.
    pub language: String,
    pub message: String,
    pub location: Option<IssueLocation>,
    pub note: Option<String>,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    pub fn from_compile_error(language: &str, error: &CompileError) -> Self {
        let (rule, message, note) = match error {
            CompileError::Delimiters(err) => (Rule::Delimiters, err.to_string(), None),
            CompileError::Syntax { message, .. } => (Rule::Syntax, message.clone(), None),
            CompileError::DuplicateKey { key, first, .. } => (
                Rule::DuplicateKey,
                format!("duplicate key `{}`", key),
                Some(format!("first declared at {}", first)),
            ),
            CompileError::MissingReference { key, missing, .. } => (
                Rule::MissingEmbed,
                format!("`{}` embeds `{}`, which is not defined", key, missing),
                None,
            ),
            CompileError::CircularReference { .. } => {
                (Rule::CircularEmbed, error.to_string(), None)
            }
            CompileError::Resource { .. } => (Rule::UnreadableFile, error.to_string(), None),
            CompileError::Consistency { .. } => (
                Rule::FileSet,
                error.to_string(),
                Some("every language must provide the declared files".to_string()),
            ),
        };

        Self {
            rule,
            language: language.to_string(),
            message,
            location: error.origin().as_ref().map(IssueLocation::from),
            note,
        }
    }

    /// `key` is defined in the primary language but not in `language`.
    pub fn missing_translation(language: &str, key: &str, primary: &str, origin: &Origin) -> Self {
        Self {
            rule: Rule::MissingTranslation,
            language: language.to_string(),
            message: format!("`{}` has no text in `{}`", key, language),
            location: Some(origin.into()),
            note: Some(format!("defined in primary language `{}`", primary)),
        }
    }

    /// `key` is defined in `language` but not in the primary language.
    pub fn orphan_key(language: &str, key: &str, primary: &str, origin: &Origin) -> Self {
        Self {
            rule: Rule::OrphanKey,
            language: language.to_string(),
            message: format!("`{}` is not defined in primary language `{}`", key, primary),
            location: Some(origin.into()),
            note: None,
        }
    }
}

/// Order issues by file, line and column; issues without a location first.
pub fn compare_issues(a: &Issue, b: &Issue) -> Ordering {
    a.location
        .cmp(&b.location)
        .then_with(|| a.language.cmp(&b.language))
        .then_with(|| a.rule.cmp(&b.rule))
        .then_with(|| a.message.cmp(&b.message))
}
