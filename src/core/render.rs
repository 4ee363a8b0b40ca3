//! Rendering resolved entries with substitutions.
//!
//! Variable lookup order: ad-hoc substitutions (first match wins), then the
//! permanent table, then the [`UnresolvedPolicy`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    delimiters::Delimiters,
    entry::{Entry, Segment},
};

/// Name of the variable bound to the requested key when the fail entry is
/// rendered.
pub const FAIL_KEY_VARIABLE: &str = "__key__";

/// What to render for a variable that has no substitution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Render nothing.
    #[default]
    Empty,
    /// Render the variable as written in the source, e.g. `(:name:)`.
    Placeholder,
}

/// Session-wide substitutions consulted after the ad-hoc ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermanentTable {
    values: BTreeMap<String, String>,
}

impl PermanentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set a value, returning the one it replaces.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PermanentTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Everything needed to turn an entry into text.
pub struct RenderContext<'a> {
    pub ad_hoc: &'a [(&'a str, &'a str)],
    pub permanent: &'a PermanentTable,
    pub policy: UnresolvedPolicy,
    pub delimiters: &'a Delimiters,
}

impl RenderContext<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.ad_hoc
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| *value)
            .or_else(|| self.permanent.get(name))
    }

    fn unresolved(&self, name: &str, out: &mut String) {
        match self.policy {
            UnresolvedPolicy::Empty => {
                tracing::warn!("no substitution for variable `{}`", name);
            }
            UnresolvedPolicy::Placeholder => {
                out.push_str(&self.delimiters.open_var);
                out.push_str(name);
                out.push_str(&self.delimiters.close_var);
            }
        }
    }
}

/// Concatenate the segments of `entry`, substituting its variables.
pub fn render(entry: &Entry, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    for segment in entry.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Variable(name) => match ctx.lookup(name) {
                Some(value) => out.push_str(value),
                None => ctx.unresolved(name, &mut out),
            },
            Segment::Embed(key) => {
                // resolved entries never hold embeds; keep the source form visible
                out.push_str(&ctx.delimiters.open_embed);
                out.push_str(key);
                out.push_str(&ctx.delimiters.close_embed);
            }
        }
    }
    out
}
