use std::collections::BTreeMap;

use super::{error::Origin, lexer::Position};

/// One piece of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text copied verbatim.
    Literal(String),
    /// Placeholder replaced by a substitution at render time.
    Variable(String),
    /// Reference to another entry, inlined by the resolver.
    Embed(String),
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Segment::Variable(name.into())
    }

    pub fn embed(key: impl Into<String>) -> Self {
        Segment::Embed(key.into())
    }
}

/// Compiled text of one key: segments concatenated in order at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    segments: Vec<Segment>,
}

impl Entry {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Names of the variables this entry expects, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Keys embedded by this entry, in order of appearance.
    pub fn embeds(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Embed(key) => Some(key.as_str()),
            _ => None,
        })
    }

    /// Concatenation of the literal segments, ignoring everything else.
    pub fn literal_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Literal(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Merge adjacent literals and drop empty ones.
pub(crate) fn compact(segments: Vec<Segment>) -> Vec<Segment> {
    let mut compacted: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let Segment::Literal(text) = &segment {
            if text.is_empty() {
                continue;
            }
            if let Some(Segment::Literal(previous)) = compacted.last_mut() {
                previous.push_str(text);
                continue;
            }
        }
        compacted.push(segment);
    }
    compacted
}

/// An entry as written in a source file, before embeds are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub entry: Entry,
    /// Location of the label opening this definition.
    pub origin: Origin,
    /// Position of the first embed of each key, in the same file as `origin`.
    pub embeds: BTreeMap<String, Position>,
}

impl Definition {
    /// Where this definition embeds `key`, or its label if it does not.
    pub fn embed_origin(&self, key: &str) -> Origin {
        match self.embeds.get(key) {
            Some(position) => Origin::new(self.origin.file.clone(), *position),
            None => self.origin.clone(),
        }
    }
}

/// Unresolved definitions keyed by entry key.
pub type Definitions = BTreeMap<String, Definition>;
