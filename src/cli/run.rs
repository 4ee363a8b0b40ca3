//! Main entry point for the glossa CLI.
//!
//! Dispatches to the appropriate command handler based on the parsed
//! arguments.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, get::get, init::init, keys::keys},
    exit_status::ExitStatus,
    logger, report,
};

/// Parse-to-exit driver used by the binary.
///
/// Returns `Err` when a command could not run at all (config errors, an
/// unreadable root); compile errors are reported and mapped to
/// [`ExitStatus::Failure`].
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logger::init(args.verbose())?;

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run(args)?;
    report::print(&result);

    Ok(ExitStatus::from_result(&result))
}

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Get(cmd)) => get(cmd),
        Some(Command::Keys(cmd)) => keys(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
