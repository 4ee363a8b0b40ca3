//! Parser turning one file's tokens into unresolved definitions.
//!
//! Each entry goes through two phases, label then value:
//!
//! ```text
//! Scan --open-label--> Label --literal--> Label(key) --close-label--> AwaitValue
//! AwaitValue --open-value--> Value --close-value--> Scan
//! ```
//!
//! Inside a value, `open-var literal close-var` and `open-embed literal
//! close-embed` build variable and embed segments; a bare literal is text.
//! Whitespace-only literals are skipped between entries and between a label
//! and its value. Running out of tokens anywhere but `Scan` is an
//! unexpected end of file.

use std::collections::{BTreeMap, btree_map};

use super::{
    delimiters::Delimiters,
    entry::{Definition, Definitions, Entry, Segment},
    error::{CompileError, Origin},
    lexer::{Position, Token, TokenKind, end_position, tokenize},
};

enum State {
    Scan,
    Label {
        open: Position,
        key: Option<String>,
    },
    AwaitValue {
        key: String,
        origin: Origin,
    },
    Value {
        key: String,
        origin: Origin,
        body: ValueBuilder,
    },
}

/// Tokenize and parse the text of one file.
pub fn parse_source(
    file: &str,
    text: &str,
    delimiters: &Delimiters,
) -> Result<Definitions, CompileError> {
    parse(file, tokenize(text, delimiters), end_position(text))
}

/// Parse a file's tokens. `end` is the position reported for an
/// unexpected end of file.
pub fn parse(file: &str, tokens: Vec<Token>, end: Position) -> Result<Definitions, CompileError> {
    let mut definitions = Definitions::new();
    let mut state = State::Scan;

    for token in tokens {
        state = match state {
            State::Scan => match token.kind {
                _ if token.is_blank_literal() => State::Scan,
                TokenKind::OpenLabel => State::Label {
                    open: token.position,
                    key: None,
                },
                _ => return Err(unexpected(file, &token, "outside of an entry")),
            },
            State::Label { open, key: None } => match token.kind {
                TokenKind::Literal => State::Label {
                    open,
                    key: Some(name_of(file, &token, "key")?),
                },
                TokenKind::CloseLabel => {
                    return Err(CompileError::syntax(file, token.position, "empty key"));
                }
                _ => return Err(unexpected(file, &token, "in label")),
            },
            State::Label {
                open,
                key: Some(key),
            } => match token.kind {
                TokenKind::CloseLabel => State::AwaitValue {
                    key,
                    origin: Origin::new(file, open),
                },
                _ => {
                    return Err(unexpected(
                        file,
                        &token,
                        &format!("after key `{}`, expected close-label", key),
                    ));
                }
            },
            State::AwaitValue { key, origin } => match token.kind {
                _ if token.is_blank_literal() => State::AwaitValue { key, origin },
                TokenKind::OpenValue => State::Value {
                    key,
                    origin,
                    body: ValueBuilder::default(),
                },
                _ => {
                    return Err(unexpected(
                        file,
                        &token,
                        &format!("after label `{}`, expected open-value", key),
                    ));
                }
            },
            State::Value {
                key,
                origin,
                mut body,
            } => match body.feed(file, &token)? {
                Step::Continue => State::Value { key, origin, body },
                Step::Close => {
                    let (entry, embeds) = body.finish(file, end)?;
                    let definition = Definition {
                        entry,
                        origin,
                        embeds,
                    };
                    insert(&mut definitions, key, definition)?;
                    State::Scan
                }
            },
        };
    }

    match state {
        State::Scan => Ok(definitions),
        State::Label { open, .. } => Err(CompileError::syntax(
            file,
            end,
            format!("unexpected end of file in label opened at {}", open),
        )),
        State::AwaitValue { key, .. } => Err(CompileError::syntax(
            file,
            end,
            format!("unexpected end of file, missing value for `{}`", key),
        )),
        State::Value { key, .. } => Err(CompileError::syntax(
            file,
            end,
            format!("unexpected end of file in value of `{}`", key),
        )),
    }
}

/// Parse a bare value body, as used by the fail entry: the text that would
/// sit between the value delimiters of a definition.
pub fn parse_value(file: &str, text: &str, delimiters: &Delimiters) -> Result<Entry, CompileError> {
    let end = end_position(text);
    let mut body = ValueBuilder::default();
    for token in tokenize(text, delimiters) {
        if let Step::Close = body.feed(file, &token)? {
            return Err(unexpected(file, &token, "in a bare value"));
        }
    }
    body.finish(file, end).map(|(entry, _)| entry)
}

/// Merge per-file definitions in declaration order, rejecting keys defined
/// in more than one file.
pub fn merge<I>(files: I) -> Result<Definitions, CompileError>
where
    I: IntoIterator<Item = Definitions>,
{
    let mut merged = Definitions::new();
    for definitions in files {
        for (key, definition) in definitions {
            insert(&mut merged, key, definition)?;
        }
    }
    Ok(merged)
}

fn insert(
    definitions: &mut Definitions,
    key: String,
    definition: Definition,
) -> Result<(), CompileError> {
    match definitions.entry(key) {
        btree_map::Entry::Occupied(existing) => Err(CompileError::DuplicateKey {
            key: existing.key().clone(),
            first: existing.get().origin.clone(),
            second: definition.origin,
        }),
        btree_map::Entry::Vacant(slot) => {
            slot.insert(definition);
            Ok(())
        }
    }
}

enum Step {
    Continue,
    Close,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PlaceholderKind {
    Variable,
    Embed,
}

impl PlaceholderKind {
    fn closer(self) -> TokenKind {
        match self {
            PlaceholderKind::Variable => TokenKind::CloseVar,
            PlaceholderKind::Embed => TokenKind::CloseEmbed,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            PlaceholderKind::Variable => "variable name",
            PlaceholderKind::Embed => "embedded key",
        }
    }
}

struct Placeholder {
    kind: PlaceholderKind,
    open: Position,
    name: Option<String>,
}

/// Accumulates the segments of one value.
#[derive(Default)]
struct ValueBuilder {
    segments: Vec<Segment>,
    pending: Option<Placeholder>,
    embeds: BTreeMap<String, Position>,
}

impl ValueBuilder {
    fn feed(&mut self, file: &str, token: &Token) -> Result<Step, CompileError> {
        if let Some(placeholder) = self.pending.as_mut() {
            match (token.kind, placeholder.name.take()) {
                (TokenKind::Literal, None) => {
                    placeholder.name = Some(name_of(file, token, placeholder.kind.noun())?);
                }
                (kind, Some(name)) if kind == placeholder.kind.closer() => {
                    self.segments.push(match placeholder.kind {
                        PlaceholderKind::Variable => Segment::Variable(name),
                        PlaceholderKind::Embed => {
                            self.embeds.entry(name.clone()).or_insert(placeholder.open);
                            Segment::Embed(name)
                        }
                    });
                    self.pending = None;
                }
                (kind, None) if kind == placeholder.kind.closer() => {
                    return Err(CompileError::syntax(
                        file,
                        token.position,
                        format!("empty {}", placeholder.kind.noun()),
                    ));
                }
                _ => {
                    return Err(unexpected(
                        file,
                        token,
                        &format!("in {} opened at {}", placeholder.kind.noun(), placeholder.open),
                    ));
                }
            }
            return Ok(Step::Continue);
        }

        match token.kind {
            TokenKind::Literal => self.segments.push(Segment::Literal(token.text.clone())),
            TokenKind::OpenVar => self.open(PlaceholderKind::Variable, token.position),
            TokenKind::OpenEmbed => self.open(PlaceholderKind::Embed, token.position),
            TokenKind::CloseValue => return Ok(Step::Close),
            _ => return Err(unexpected(file, token, "in value")),
        }
        Ok(Step::Continue)
    }

    fn open(&mut self, kind: PlaceholderKind, open: Position) {
        self.pending = Some(Placeholder {
            kind,
            open,
            name: None,
        });
    }

    fn finish(
        self,
        file: &str,
        end: Position,
    ) -> Result<(Entry, BTreeMap<String, Position>), CompileError> {
        match self.pending {
            Some(placeholder) => Err(CompileError::syntax(
                file,
                end,
                format!(
                    "unexpected end of file in {} opened at {}",
                    placeholder.kind.noun(),
                    placeholder.open
                ),
            )),
            None => Ok((Entry::new(self.segments), self.embeds)),
        }
    }
}

fn name_of(file: &str, token: &Token, noun: &str) -> Result<String, CompileError> {
    let name = token.text.trim();
    if name.is_empty() {
        return Err(CompileError::syntax(
            file,
            token.position,
            format!("empty {}", noun),
        ));
    }
    Ok(name.to_string())
}

fn unexpected(file: &str, token: &Token, context: &str) -> CompileError {
    let found = match token.kind {
        TokenKind::Literal => format!("literal `{}`", token.text.trim()),
        kind => format!("{} `{}`", kind, token.text),
    };
    CompileError::syntax(
        file,
        token.position,
        format!("unexpected {} {}", found, context),
    )
}
