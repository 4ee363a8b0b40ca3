//! Orphan key detection rule.
//!
//! Detects keys that exist in non-primary languages but are missing from
//! the primary language.

use std::collections::BTreeMap;

use crate::{core::Definitions, issues::Issue};

/// Check for orphan keys.
///
/// These are typically leftovers of texts removed from the primary language
/// but not from its translations. Each issue points at the orphan definition.
pub fn check_orphan_keys(
    primary: &str,
    all_definitions: &BTreeMap<String, Definitions>,
) -> Vec<Issue> {
    let Some(primary_definitions) = all_definitions.get(primary) else {
        return Vec::new();
    };

    all_definitions
        .iter()
        .filter(|(language, _)| language.as_str() != primary)
        .flat_map(|(language, definitions)| {
            definitions
                .iter()
                .filter(|(key, _)| !primary_definitions.contains_key(key.as_str()))
                .map(|(key, definition)| {
                    Issue::orphan_key(language, key, primary, &definition.origin)
                })
        })
        .collect()
}
