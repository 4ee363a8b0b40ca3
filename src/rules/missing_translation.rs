//! Missing translation detection rule.
//!
//! Detects keys that are defined in the primary language but missing in one
//! or more other languages.

use std::collections::BTreeMap;

use crate::{core::Definitions, issues::Issue};

/// Check every non-primary language against the primary one.
///
/// Each issue points at the primary definition of the key. Languages that
/// failed to compile are absent from `all_definitions` and not reported.
pub fn check_missing_translations(
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
            primary_definitions
                .iter()
                .filter(|(key, _)| !definitions.contains_key(key.as_str()))
                .map(|(key, definition)| {
                    Issue::missing_translation(language, key, primary, &definition.origin)
                })
        })
        .collect()
}
