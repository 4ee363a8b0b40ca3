//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept apart from the commands
//! so glossa can be used as a library without pulling in terminal output.

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CheckSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, IssueLocation, Severity, compare_issues};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);
    let mut sources = SourceCache::default();

    for issue in &sorted {
        print_issue(issue, writer, max_line_width, &mut sources);
    }

    print_summary(&sorted, writer);
}

/// Print a success message after a clean check.
pub fn print_success_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let languages = summary.languages.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {}, {} {} - no issues found",
            languages,
            if languages == 1 { "language" } else { "languages" },
            summary.files_checked,
            if summary.files_checked == 1 { "file" } else { "files" }
        )
        .green()
    );
}

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());

    if let CommandSummary::Init(InitSummary { created: false }) = result.summary {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

/// Print the output of any command to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    report_to(&result.issues, writer);

    match &result.summary {
        CommandSummary::Check(summary) => {
            if result.issues.is_empty() {
                print_success_to(summary, writer);
            }
        }
        CommandSummary::Get(summary) => {
            if let Some(text) = &summary.text {
                let _ = writeln!(writer, "{}", text);
            }
        }
        CommandSummary::Keys(summary) => {
            for key in &summary.keys {
                let _ = writeln!(writer, "{}", key);
            }
        }
        CommandSummary::Init(summary) => {
            if summary.created {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Created {}", CONFIG_FILE_NAME).green()
                );
            }
        }
    }
}

// ============================================================
// Internal Functions
// ============================================================

/// Source files read while reporting, by path. `None` if unreadable.
#[derive(Default)]
struct SourceCache {
    files: HashMap<String, Option<Vec<String>>>,
}

impl SourceCache {
    fn line(&mut self, location: &IssueLocation) -> Option<&str> {
        let lines = self
            .files
            .entry(location.file.clone())
            .or_insert_with(|| {
                fs::read_to_string(&location.file)
                    .ok()
                    .map(|text| text.lines().map(str::to_string).collect())
            })
            .as_ref()?;
        lines
            .get(location.line.checked_sub(1)?)
            .map(String::as_str)
    }
}

fn print_issue<W: Write>(
    issue: &Issue,
    writer: &mut W,
    max_line_width: usize,
    sources: &mut SourceCache,
) {
    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}[{}]: {}  {}",
        severity_str,
        issue.language,
        issue.message,
        issue.rule.to_string().dimmed().cyan()
    );

    if let Some(location) = &issue.location {
        // Clickable location: --> path:line:col
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            location.file,
            location.line,
            location.column
        );

        if let Some(source_line) = sources.line(location) {
            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };

            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                location.line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // Caret under the column (1-based, in characters)
            let prefix: String = source_line
                .chars()
                .take(location.column.saturating_sub(1))
                .collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
    }

    if let Some(note) = &issue.note {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            note,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| i.location.as_ref().map(|l| l.line))
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================
