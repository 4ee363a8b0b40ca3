//! The localizer: compiles declared files and serves lookups.
//!
//! All state visible to readers lives in one immutable [`Snapshot`] held in
//! an [`ArcSwap`]. Every operation that changes what `get` returns builds a
//! complete new snapshot off to the side and publishes it only when the whole
//! compile succeeded, so readers see either the old or the new snapshot and a
//! failed operation has no visible effect. Writers are serialized by a mutex;
//! readers never lock.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rayon::prelude::*;

use super::{
    codex::Codex,
    delimiters::Delimiters,
    entry::{Definitions, Entry},
    error::CompileError,
    parser::{merge, parse_source, parse_value},
    render::{FAIL_KEY_VARIABLE, PermanentTable, RenderContext, UnresolvedPolicy, render},
    resolver::{resolve, resolve_entry},
    storage::{FsStorage, Storage, source_path},
};

/// Name used for the fail entry in diagnostics.
pub const FAIL_ENTRY_NAME: &str = "<fail entry>";

/// Default fail entry template for a delimiter set:
/// `missing text for '(:__key__:)'` with the default delimiters.
pub fn default_fail_template(delimiters: &Delimiters) -> String {
    format!(
        "missing text for '{}{}{}'",
        delimiters.open_var, FAIL_KEY_VARIABLE, delimiters.close_var
    )
}

/// Everything `get` needs, published as one unit.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root: PathBuf,
    language: String,
    files: Vec<String>,
    fail_template: String,
    policy: UnresolvedPolicy,
    codex: Arc<Codex>,
    fail_entry: Arc<Entry>,
}

impl Snapshot {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Declared files, in declaration order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn fail_template(&self) -> &str {
        &self.fail_template
    }

    pub fn policy(&self) -> UnresolvedPolicy {
        self.policy
    }

    pub fn codex(&self) -> &Arc<Codex> {
        &self.codex
    }

    pub fn fail_entry(&self) -> &Entry {
        &self.fail_entry
    }
}

pub struct Localizer<S: Storage = FsStorage> {
    storage: S,
    delimiters: Delimiters,
    snapshot: ArcSwap<Snapshot>,
    permanent: ArcSwap<PermanentTable>,
    write_lock: Mutex<()>,
}

impl Localizer<FsStorage> {
    /// Localizer reading `<root>/<language>/<file>` from disk with the
    /// default delimiters.
    pub fn open(root: impl Into<PathBuf>, language: impl Into<String>) -> Result<Self, CompileError> {
        Self::new(FsStorage, Delimiters::default(), root, language)
    }
}

impl<S: Storage> Localizer<S> {
    /// Create a localizer with no declared files and the default fail entry.
    ///
    /// Fails if the delimiter set is invalid.
    pub fn new(
        storage: S,
        delimiters: Delimiters,
        root: impl Into<PathBuf>,
        language: impl Into<String>,
    ) -> Result<Self, CompileError> {
        delimiters.validate()?;

        let codex = Arc::new(Codex::default());
        let fail_template = default_fail_template(&delimiters);
        let fail_entry = compile_fail_entry(&fail_template, &codex, &delimiters)?;
        let snapshot = Snapshot {
            root: root.into(),
            language: language.into(),
            files: Vec::new(),
            fail_template,
            policy: UnresolvedPolicy::default(),
            codex,
            fail_entry: Arc::new(fail_entry),
        };

        Ok(Self {
            storage,
            delimiters,
            snapshot: ArcSwap::from_pointee(snapshot),
            permanent: ArcSwap::from_pointee(PermanentTable::new()),
            write_lock: Mutex::new(()),
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    pub fn codex(&self) -> Arc<Codex> {
        self.snapshot.load().codex.clone()
    }

    pub fn language(&self) -> String {
        self.snapshot.load().language.clone()
    }

    pub fn root(&self) -> PathBuf {
        self.snapshot.load().root.clone()
    }

    pub fn files(&self) -> Vec<String> {
        self.snapshot.load().files.clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.snapshot.load().codex.contains(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.snapshot
            .load()
            .codex
            .keys()
            .map(str::to_string)
            .collect()
    }

    /// Declare one more file and recompile everything.
    ///
    /// Declaring a file twice is a no-op.
    pub fn add_file(&self, name: impl Into<String>) -> Result<(), CompileError> {
        self.add_files([name])
    }

    /// Declare several files at once; either all of them are added or none.
    pub fn add_files<I, N>(&self, names: I) -> Result<(), CompileError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let _guard = self.write_lock.lock();
        let current = self.snapshot.load_full();

        let mut files = current.files.clone();
        for name in names {
            let name = name.into();
            if !files.contains(&name) {
                files.push(name);
            }
        }
        if files.len() == current.files.len() {
            return Ok(());
        }

        let next = Snapshot {
            files,
            ..(*current).clone()
        };
        self.publish(self.rebuild(next)?);
        Ok(())
    }

    /// Switch to another root directory. Every declared file must exist
    /// under the new root for the current language.
    pub fn set_root(&self, root: impl Into<PathBuf>) -> Result<(), CompileError> {
        let _guard = self.write_lock.lock();
        let current = self.snapshot.load_full();
        let next = Snapshot {
            root: root.into(),
            ..(*current).clone()
        };
        self.check_file_set(&next)?;
        self.publish(self.rebuild(next)?);
        Ok(())
    }

    /// Switch to another language. Every declared file must exist for the
    /// new language, otherwise nothing changes.
    pub fn set_language(&self, language: impl Into<String>) -> Result<(), CompileError> {
        let _guard = self.write_lock.lock();
        let current = self.snapshot.load_full();
        let next = Snapshot {
            language: language.into(),
            ..(*current).clone()
        };
        self.check_file_set(&next)?;
        self.publish(self.rebuild(next)?);
        Ok(())
    }

    /// Re-read and recompile the declared files with unchanged settings.
    pub fn recompile(&self) -> Result<(), CompileError> {
        let _guard = self.write_lock.lock();
        let current = self.snapshot.load_full();
        self.publish(self.rebuild((*current).clone())?);
        Ok(())
    }

    /// Replace the fail entry. `template` is a bare value body such as
    /// `no text for (:__key__:)`; embeds are resolved against the current
    /// codex.
    pub fn set_fail_entry(&self, template: impl Into<String>) -> Result<(), CompileError> {
        let _guard = self.write_lock.lock();
        let current = self.snapshot.load_full();
        let fail_template = template.into();
        let fail_entry = compile_fail_entry(&fail_template, &current.codex, &self.delimiters)?;
        self.publish(Snapshot {
            fail_template,
            fail_entry: Arc::new(fail_entry),
            ..(*current).clone()
        });
        Ok(())
    }

    pub fn set_unresolved_policy(&self, policy: UnresolvedPolicy) {
        let _guard = self.write_lock.lock();
        let current = self.snapshot.load_full();
        self.publish(Snapshot {
            policy,
            ..(*current).clone()
        });
    }

    /// Set a permanent substitution, returning the value it replaces.
    pub fn set_substitution(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.update_permanent(|table| table.insert(name, value))
    }

    pub fn remove_substitution(&self, name: &str) -> Option<String> {
        self.update_permanent(|table| table.remove(name))
    }

    pub fn set_substitutions(&self, table: PermanentTable) {
        let _guard = self.write_lock.lock();
        self.permanent.store(Arc::new(table));
    }

    pub fn clear_substitutions(&self) {
        self.set_substitutions(PermanentTable::new());
    }

    pub fn substitution(&self, name: &str) -> Option<String> {
        self.permanent.load().get(name).map(str::to_string)
    }

    /// Render `key` with the given ad-hoc substitutions.
    ///
    /// Never fails: an unknown key renders the fail entry with `__key__`
    /// bound to the requested key.
    pub fn get(&self, key: &str, ad_hoc: &[(&str, &str)]) -> String {
        let snapshot = self.snapshot.load();
        let permanent = self.permanent.load();

        match snapshot.codex.get(key) {
            Some(entry) => render(
                entry,
                &RenderContext {
                    ad_hoc,
                    permanent: &permanent,
                    policy: snapshot.policy,
                    delimiters: &self.delimiters,
                },
            ),
            None => {
                tracing::warn!(
                    "no entry for key `{}` in language `{}`",
                    key,
                    snapshot.language
                );
                let mut substitutions = Vec::with_capacity(ad_hoc.len() + 1);
                substitutions.push((FAIL_KEY_VARIABLE, key));
                substitutions.extend_from_slice(ad_hoc);
                render(
                    &snapshot.fail_entry,
                    &RenderContext {
                        ad_hoc: &substitutions,
                        permanent: &permanent,
                        policy: snapshot.policy,
                        delimiters: &self.delimiters,
                    },
                )
            }
        }
    }

    fn update_permanent<T>(&self, update: impl FnOnce(&mut PermanentTable) -> T) -> T {
        let _guard = self.write_lock.lock();
        let mut table = PermanentTable::clone(&self.permanent.load());
        let result = update(&mut table);
        self.permanent.store(Arc::new(table));
        result
    }

    fn publish(&self, snapshot: Snapshot) {
        tracing::debug!(
            "publishing {} entries for language `{}`",
            snapshot.codex.len(),
            snapshot.language
        );
        self.snapshot.store(Arc::new(snapshot));
    }

    fn check_file_set(&self, next: &Snapshot) -> Result<(), CompileError> {
        let missing: Vec<String> = next
            .files
            .iter()
            .filter(|file| !self.storage.exists(&next.root, &next.language, file))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CompileError::Consistency {
                language: next.language.clone(),
                missing,
            })
        }
    }

    /// Compile the declared files of `next` and the fail entry against the
    /// result. Nothing is published here.
    fn rebuild(&self, mut next: Snapshot) -> Result<Snapshot, CompileError> {
        let codex = Arc::new(compile_language(
            &self.storage,
            &self.delimiters,
            &next.root,
            &next.language,
            &next.files,
        )?);
        let fail_entry = compile_fail_entry(&next.fail_template, &codex, &self.delimiters)?;
        next.codex = codex;
        next.fail_entry = Arc::new(fail_entry);
        Ok(next)
    }
}

/// Run the full pipeline for one language: read, tokenize and parse every
/// file (in parallel), merge, resolve.
///
/// Errors are reported for the first failing file in declaration order.
pub fn compile_language<S: Storage + ?Sized>(
    storage: &S,
    delimiters: &Delimiters,
    root: &Path,
    language: &str,
    files: &[String],
) -> Result<Codex, CompileError> {
    resolve(&load_definitions(storage, delimiters, root, language, files)?)
}

/// Read, tokenize, parse and merge the declared files of one language,
/// keeping the origin of every definition.
pub fn load_definitions<S: Storage + ?Sized>(
    storage: &S,
    delimiters: &Delimiters,
    root: &Path,
    language: &str,
    files: &[String],
) -> Result<Definitions, CompileError> {
    tracing::debug!(
        "compiling {} file(s) for language `{}` under {}",
        files.len(),
        language,
        root.display()
    );

    let parsed: Vec<Result<Definitions, CompileError>> = files
        .par_iter()
        .map(|file| {
            let text = storage.read(root, language, file)?;
            let display = source_path(root, language, file).display().to_string();
            parse_source(&display, &text, delimiters)
        })
        .collect();

    let parsed = parsed.into_iter().collect::<Result<Vec<_>, _>>()?;
    merge(parsed)
}

/// Parse a fail entry template and resolve its embeds against `codex`.
pub fn compile_fail_entry(
    template: &str,
    codex: &Codex,
    delimiters: &Delimiters,
) -> Result<Entry, CompileError> {
    let entry = parse_value(FAIL_ENTRY_NAME, template, delimiters)?;
    resolve_entry(&entry, codex, FAIL_ENTRY_NAME)
}
