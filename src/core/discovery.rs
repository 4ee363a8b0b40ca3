//! Expansion of declared file names against a language directory.
//!
//! Declared names containing `*` or `?` are glob patterns matched against
//! the files a language provides; other names are taken literally.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use glob::Pattern;

use super::storage::Storage;

/// Check if a declared name contains glob wildcards (* or ?).
pub fn is_glob_pattern(name: &str) -> bool {
    name.contains('*') || name.contains('?')
}

/// Expand declared names into concrete file names for `language`.
///
/// Order follows the declarations; files matched by several patterns are
/// listed once. A pattern matching nothing contributes nothing, a literal
/// name is kept even if the file does not exist so the compile reports it.
pub fn expand_files<S: Storage + ?Sized>(
    storage: &S,
    root: &Path,
    language: &str,
    declared: &[String],
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    let mut available: Option<Vec<String>> = None;

    for name in declared {
        if !is_glob_pattern(name) {
            if seen.insert(name.clone()) {
                files.push(name.clone());
            }
            continue;
        }

        let pattern = Pattern::new(name)
            .with_context(|| format!("Invalid glob pattern in 'files': \"{}\"", name))?;
        if available.is_none() {
            available = Some(storage.files(root, language).with_context(|| {
                format!(
                    "Failed to list files of language '{}' under {}",
                    language,
                    root.display()
                )
            })?);
        }
        for file in available.iter().flatten() {
            if pattern.matches(file) && seen.insert(file.clone()) {
                files.push(file.clone());
            }
        }
    }

    Ok(files)
}
