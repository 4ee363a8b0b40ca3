//! Glossa - a compiler for delimiter-based localization files
//!
//! Localization texts live in plain files under `<root>/<language>/`. Each
//! file holds labelled entries whose values may contain variables and embed
//! other entries. Glossa tokenizes, parses and resolves them into a codex of
//! flat entries and renders texts with substitutions at lookup time.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (check, get, keys, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Compilation pipeline and the [`core::Localizer`] facade
//! - `issues`: Issue types for reporting compile errors and warnings
//! - `rules`: Key parity rules across languages

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
