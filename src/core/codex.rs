use std::collections::BTreeMap;

use super::entry::Entry;

/// Resolved entries of one language, keyed by entry key.
///
/// A codex is built once by the resolver and never changes; a recompile
/// produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codex {
    entries: BTreeMap<String, Entry>,
}

impl Codex {
    pub(crate) fn new(entries: BTreeMap<String, Entry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }
}
