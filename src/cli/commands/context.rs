//! Shared setup for commands: config lookup, CLI overrides and localizer
//! construction.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, ConfigLoadResult, load_config},
    core::{CompileError, FsStorage, Localizer, Storage, UnresolvedPolicy, discovery::expand_files},
};

pub struct CliContext {
    pub config: Config,
    /// Localization root, with CLI override applied.
    pub root: PathBuf,
    /// Primary language, with CLI override applied.
    pub language: String,
    storage: FsStorage,
}

impl CliContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let ConfigLoadResult {
            config,
            base_dir,
            from_file,
        } = load_config(&common.path)?;

        let root = match &common.root {
            Some(root) => root.clone(),
            None => config.root_dir(&base_dir),
        };
        let language = common
            .language
            .clone()
            .unwrap_or_else(|| config.language.clone());

        if from_file {
            tracing::debug!("using config from {}", base_dir.display());
        } else {
            tracing::debug!("no config file found, using defaults");
        }
        tracing::debug!("root {}, language `{}`", root.display(), language);

        Ok(Self {
            config,
            root,
            language,
            storage: FsStorage,
        })
    }

    pub fn storage(&self) -> &FsStorage {
        &self.storage
    }

    /// Languages found under the root.
    pub fn languages(&self) -> Result<Vec<String>> {
        self.storage
            .languages(&self.root)
            .with_context(|| format!("Failed to list languages under {}", self.root.display()))
    }

    /// Declared files expanded against `language`.
    pub fn declared_files(&self, language: &str) -> Result<Vec<String>> {
        expand_files(&self.storage, &self.root, language, &self.config.files)
    }

    /// Build a localizer for the primary language with everything the config
    /// sets: delimiters, declared files, fail entry, substitutions, policy.
    pub fn localizer(
        &self,
        files: Vec<String>,
        policy: Option<UnresolvedPolicy>,
    ) -> Result<Localizer, CompileError> {
        let localizer = Localizer::new(
            self.storage,
            self.config.delimiters.clone(),
            &self.root,
            &self.language,
        )?;
        localizer.set_unresolved_policy(policy.unwrap_or(self.config.unresolved_variables));
        localizer.set_substitutions(self.config.permanent_table());
        localizer.add_files(files)?;
        if let Some(template) = &self.config.fail_entry {
            localizer.set_fail_entry(template.as_str())?;
        }
        Ok(localizer)
    }
}
