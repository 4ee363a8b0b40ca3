//! Delimiter configuration for localization source files.
//!
//! A [`Delimiters`] value holds the eight delimiter strings that frame labels,
//! values, variables and embeds, plus the comment character. It is validated
//! once at construction and never changes afterwards.

use serde::{Deserialize, Serialize};

use super::error::DelimiterError;
use super::lexer::TokenKind;

/// The eight delimiter strings and the comment character.
///
/// Defaults: label `[: :]`, value `{: :}`, variable `(: :)`, embed `<: :>`,
/// comment `#`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Delimiters {
    pub open_label: String,
    pub close_label: String,
    pub open_value: String,
    pub close_value: String,
    pub open_var: String,
    pub close_var: String,
    pub open_embed: String,
    pub close_embed: String,
    pub comment: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open_label: "[:".to_string(),
            close_label: ":]".to_string(),
            open_value: "{:".to_string(),
            close_value: ":}".to_string(),
            open_var: "(:".to_string(),
            close_var: ":)".to_string(),
            open_embed: "<:".to_string(),
            close_embed: ":>".to_string(),
            comment: '#',
        }
    }
}

impl Delimiters {
    /// Build a delimiter set from its parts, validating it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        open_label: impl Into<String>,
        close_label: impl Into<String>,
        open_value: impl Into<String>,
        close_value: impl Into<String>,
        open_var: impl Into<String>,
        close_var: impl Into<String>,
        open_embed: impl Into<String>,
        close_embed: impl Into<String>,
        comment: char,
    ) -> Result<Self, DelimiterError> {
        let delimiters = Self {
            open_label: open_label.into(),
            close_label: close_label.into(),
            open_value: open_value.into(),
            close_value: close_value.into(),
            open_var: open_var.into(),
            close_var: close_var.into(),
            open_embed: open_embed.into(),
            close_embed: close_embed.into(),
            comment,
        };
        delimiters.validate()?;
        Ok(delimiters)
    }

    /// All delimiter strings paired with the token kind they produce.
    pub fn table(&self) -> [(TokenKind, &str); 8] {
        [
            (TokenKind::OpenLabel, self.open_label.as_str()),
            (TokenKind::CloseLabel, self.close_label.as_str()),
            (TokenKind::OpenValue, self.open_value.as_str()),
            (TokenKind::CloseValue, self.close_value.as_str()),
            (TokenKind::OpenVar, self.open_var.as_str()),
            (TokenKind::CloseVar, self.close_var.as_str()),
            (TokenKind::OpenEmbed, self.open_embed.as_str()),
            (TokenKind::CloseEmbed, self.close_embed.as_str()),
        ]
    }

    /// The delimiter text for a token kind, `None` for literals.
    pub fn text_of(&self, kind: TokenKind) -> Option<&str> {
        self.table()
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, text)| text)
    }

    /// Check that every delimiter is non-empty, stays on one line, and that no
    /// delimiter equals, or is a prefix of, another one.
    ///
    /// The comment character must not be whitespace and must not begin any
    /// delimiter, otherwise comment detection would swallow entries.
    pub fn validate(&self) -> Result<(), DelimiterError> {
        let table = self.table();

        for (kind, text) in &table {
            if text.is_empty() {
                return Err(DelimiterError::Empty { kind: *kind });
            }
            // the lexer matches delimiters within a single line
            if text.contains(['\n', '\r']) {
                return Err(DelimiterError::LineBreak { kind: *kind });
            }
        }

        for (i, (first_kind, first)) in table.iter().enumerate() {
            for (second_kind, second) in &table[i + 1..] {
                if first == second {
                    return Err(DelimiterError::Duplicate {
                        first: *first_kind,
                        second: *second_kind,
                        text: first.to_string(),
                    });
                }
                if second.starts_with(first) || first.starts_with(second) {
                    let (prefix, prefix_kind, longer, longer_kind) = if first.len() < second.len() {
                        (first, first_kind, second, second_kind)
                    } else {
                        (second, second_kind, first, first_kind)
                    };
                    return Err(DelimiterError::Prefix {
                        prefix: *prefix_kind,
                        prefix_text: prefix.to_string(),
                        longer: *longer_kind,
                        longer_text: longer.to_string(),
                    });
                }
            }
        }

        if self.comment.is_whitespace() {
            return Err(DelimiterError::WhitespaceComment);
        }
        if let Some((kind, _)) = table.iter().find(|(_, t)| t.starts_with(self.comment)) {
            return Err(DelimiterError::CommentOverlap {
                comment: self.comment,
                kind: *kind,
            });
        }

        Ok(())
    }
}
