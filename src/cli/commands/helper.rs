use super::{CommandResult, CommandSummary, InitSummary};
use crate::issues::{Issue, Severity, compare_issues};

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort_by(compare_issues);

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(InitSummary { created: false }) = summary {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
    }
}
