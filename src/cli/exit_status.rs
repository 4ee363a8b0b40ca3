use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status of the glossa CLI.
///
/// - `Success` (0): every compile succeeded (warnings allowed)
/// - `Failure` (1): at least one compile error was reported
/// - `Error` (2): the command itself failed (bad config, unreadable root, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
