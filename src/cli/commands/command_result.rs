use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Get(GetSummary),
    Keys(KeysSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    /// Languages that were checked, primary first.
    pub languages: Vec<String>,
    /// Number of source files read across all languages.
    pub files_checked: usize,
}

#[derive(Debug)]
pub struct GetSummary {
    /// Rendered text; `None` if the language failed to compile.
    pub text: Option<String>,
}

#[derive(Debug)]
pub struct KeysSummary {
    pub keys: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running glossa commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Compile errors and parity warnings, sorted for display.
    pub issues: Vec<Issue>,
}
