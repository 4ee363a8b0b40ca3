//! Stderr diagnostics for the CLI.
//!
//! The library reports through `tracing`; the CLI shows warnings by default
//! and everything down to debug with `-v`.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use colored::control::SHOULD_COLORIZE;
use tracing::Level;

pub fn level_for(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

/// Install the global subscriber, writing to stderr without timestamps.
pub fn init(verbose: bool) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal() && SHOULD_COLORIZE.should_colorize())
        .without_time()
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the diagnostics subscriber")
}
