//! Access to localization source files.
//!
//! Sources live under `<root>/<language>/<file>`. The compiler only needs to
//! read a file by name; listing is used for language discovery and glob
//! expansion of declared files.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;
use walkdir::WalkDir;

use super::error::CompileError;

pub trait Storage: Send + Sync {
    /// Read the raw text of `file` for `language` under `root`.
    fn read(&self, root: &Path, language: &str, file: &str) -> Result<String, CompileError>;

    /// Whether `file` exists for `language` under `root`.
    fn exists(&self, root: &Path, language: &str, file: &str) -> bool;

    /// Languages available under `root`, sorted.
    fn languages(&self, root: &Path) -> io::Result<Vec<String>>;

    /// Files of `language`, relative to the language directory, `/`-separated
    /// and sorted.
    fn files(&self, root: &Path, language: &str) -> io::Result<Vec<String>>;
}

/// Full path of a source file.
pub fn source_path(root: &Path, language: &str, file: &str) -> PathBuf {
    root.join(language).join(file)
}

/// Filesystem-backed storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read(&self, root: &Path, language: &str, file: &str) -> Result<String, CompileError> {
        let path = source_path(root, language, file);
        fs::read_to_string(&path).map_err(|source| CompileError::Resource {
            file: file.to_string(),
            path,
            source,
        })
    }

    fn exists(&self, root: &Path, language: &str, file: &str) -> bool {
        source_path(root, language, file).is_file()
    }

    fn languages(&self, root: &Path) -> io::Result<Vec<String>> {
        let mut languages = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') {
                languages.push(name);
            }
        }
        languages.sort();
        Ok(languages)
    }

    fn files(&self, root: &Path, language: &str) -> io::Result<Vec<String>> {
        let dir = root.join(language);
        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1) {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&dir) {
                files.push(to_slash(relative));
            }
        }
        files.sort();
        Ok(files)
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// In-memory storage, keyed by full path.
///
/// Files can be replaced at any time; a later compile sees the new text.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryStorage::insert`].
    pub fn with(self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.write().insert(path.into(), text.into());
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.write().remove(path.as_ref())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, root: &Path, language: &str, file: &str) -> Result<String, CompileError> {
        let path = source_path(root, language, file);
        match self.files.read().get(&path) {
            Some(text) => Ok(text.clone()),
            None => Err(CompileError::Resource {
                file: file.to_string(),
                path,
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }

    fn exists(&self, root: &Path, language: &str, file: &str) -> bool {
        self.files
            .read()
            .contains_key(&source_path(root, language, file))
    }

    fn languages(&self, root: &Path) -> io::Result<Vec<String>> {
        let mut languages: Vec<String> = self
            .files
            .read()
            .keys()
            .filter_map(|path| path.strip_prefix(root).ok())
            .filter(|relative| relative.components().count() > 1)
            .filter_map(|relative| relative.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        languages.dedup();
        Ok(languages)
    }

    fn files(&self, root: &Path, language: &str) -> io::Result<Vec<String>> {
        let dir = root.join(language);
        Ok(self
            .files
            .read()
            .keys()
            .filter_map(|path| path.strip_prefix(&dir).ok())
            .map(to_slash)
            .collect())
    }
}
