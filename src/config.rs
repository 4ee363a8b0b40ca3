use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{Delimiters, PermanentTable, UnresolvedPolicy, discovery::is_glob_pattern};

pub const CONFIG_FILE_NAME: &str = ".glossarc.json";

/// A typed value from the `substitutions` table of the config file.
///
/// JSON scalars keep their kind; rendering always goes through `Display`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(value) => write!(f, "{}", value),
            ScalarValue::Integer(value) => write!(f, "{}", value),
            ScalarValue::Float(value) => write!(f, "{}", value),
            ScalarValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one subdirectory per language.
    #[serde(default = "default_root")]
    pub root: String,
    /// Language compiled when none is given on the command line.
    #[serde(default = "default_language")]
    pub language: String,
    /// Declared files, relative to a language directory. Glob patterns allowed.
    #[serde(default = "default_files")]
    pub files: Vec<String>,
    #[serde(default)]
    pub delimiters: Delimiters,
    /// Fail entry template; the built-in one is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_entry: Option<String>,
    /// Permanent substitutions.
    #[serde(default)]
    pub substitutions: BTreeMap<String, ScalarValue>,
    #[serde(default)]
    pub unresolved_variables: UnresolvedPolicy,
}

fn default_root() -> String {
    "./lang".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_files() -> Vec<String> {
    vec!["**/*.txt".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            language: default_language(),
            files: default_files(),
            delimiters: Delimiters::default(),
            fail_entry: None,
            substitutions: BTreeMap::new(),
            unresolved_variables: UnresolvedPolicy::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the delimiter set is invalid or any glob pattern in
    /// `files` does not parse.
    pub fn validate(&self) -> Result<()> {
        self.delimiters
            .validate()
            .context("Invalid 'delimiters' in config")?;

        for pattern in &self.files {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'files': \"{}\"", pattern))?;
            }
        }

        if self.language.trim().is_empty() {
            anyhow::bail!("'language' must not be empty");
        }

        Ok(())
    }

    /// Root directory resolved against the directory the config lives in.
    pub fn root_dir(&self, base_dir: &Path) -> PathBuf {
        let root: PathBuf = base_dir
            .join(&self.root)
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root
        }
    }

    pub fn permanent_table(&self) -> PermanentTable {
        self.substitutions
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against: the
    /// directory of the config file, or the start directory for defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
