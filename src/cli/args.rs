//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Compile every language and report errors and key parity warnings
//! - `get`: Compile one language and print the text of a key
//! - `keys`: Compile one language and list its keys
//! - `init`: Initialize glossa configuration file

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::UnresolvedPolicy;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Get(cmd)) => cmd.common.verbose,
            Some(Command::Keys(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to search for the config file from
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Localization root directory (overrides config file)
    #[arg(long, env = "GLOSSA_ROOT")]
    pub root: Option<PathBuf>,

    /// Language to compile (overrides config file)
    #[arg(short, long, env = "GLOSSA_LANGUAGE")]
    pub language: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Languages to check (default: every language under the root)
    pub languages: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Key of the entry to render
    pub key: String,

    /// Ad-hoc substitution, e.g. --set name=Ada (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_substitution)]
    pub substitutions: Vec<(String, String)>,

    /// What to render for variables without a value (overrides config file)
    #[arg(long, value_enum)]
    pub unresolved: Option<UnresolvedPolicy>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile all languages and report syntax, embed and file set errors
    Check(CheckCommand),
    /// Print the text of a key in the configured language
    Get(GetCommand),
    /// List the keys of the configured language
    Keys(KeysCommand),
    /// Initialize a new .glossarc.json configuration file
    Init,
}

fn parse_substitution(value: &str) -> Result<(String, String)> {
    let Some((name, text)) = value.split_once('=') else {
        bail!("expected NAME=VALUE, got `{}`", value);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("substitution name must not be empty");
    }
    Ok((name.to_string(), text.to_string()))
}
