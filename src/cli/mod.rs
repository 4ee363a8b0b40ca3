//! Command-line interface: argument parsing, commands and terminal output.

pub mod args;
pub mod commands;
mod exit_status;
mod logger;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use run::{run, run_cli};
