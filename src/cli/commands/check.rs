use std::collections::BTreeMap;

use anyhow::Result;
use rayon::prelude::*;

use super::{
    context::CliContext,
    helper::finish,
    {CheckSummary, CommandResult, CommandSummary},
};
use crate::{
    cli::args::CheckCommand,
    core::{
        CompileError, Definitions, Storage, compile_fail_entry, default_fail_template,
        load_definitions, resolve,
    },
    issues::Issue,
    rules::{missing_translation::check_missing_translations, orphan::check_orphan_keys},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CliContext::new(&cmd.common)?;
    let primary = ctx.language.clone();

    let mut languages = if cmd.languages.is_empty() {
        ctx.languages()?
    } else {
        cmd.languages.clone()
    };
    languages.retain(|language| *language != primary);
    languages.insert(0, primary.clone());

    // The primary language defines the declared file set for everyone.
    let files = ctx.declared_files(&primary)?;
    tracing::debug!(
        "checking {} language(s) against {} declared file(s)",
        languages.len(),
        files.len()
    );

    let outcomes: Vec<(String, Result<Definitions, CompileError>)> = languages
        .par_iter()
        .map(|language| (language.clone(), check_language(&ctx, language, &files)))
        .collect();

    let mut issues = Vec::new();
    let mut all_definitions = BTreeMap::new();
    for (language, outcome) in outcomes {
        match outcome {
            Ok(definitions) => {
                tracing::debug!("`{}`: {} entries", language, definitions.len());
                all_definitions.insert(language, definitions);
            }
            Err(err) => issues.push(Issue::from_compile_error(&language, &err)),
        }
    }

    issues.extend(check_missing_translations(&primary, &all_definitions));
    issues.extend(check_orphan_keys(&primary, &all_definitions));

    let files_checked = files.len() * languages.len();
    Ok(finish(
        CommandSummary::Check(CheckSummary {
            languages,
            files_checked,
        }),
        issues,
    ))
}

/// Compile one language the way a localizer would, fail entry included.
fn check_language(
    ctx: &CliContext,
    language: &str,
    files: &[String],
) -> Result<Definitions, CompileError> {
    if language != ctx.language {
        let missing: Vec<String> = files
            .iter()
            .filter(|file| !ctx.storage().exists(&ctx.root, language, file))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(CompileError::Consistency {
                language: language.to_string(),
                missing,
            });
        }
    }

    let delimiters = &ctx.config.delimiters;
    let definitions = load_definitions(ctx.storage(), delimiters, &ctx.root, language, files)?;
    let codex = resolve(&definitions)?;

    let template = match &ctx.config.fail_entry {
        Some(template) => template.clone(),
        None => default_fail_template(delimiters),
    };
    compile_fail_entry(&template, &codex, delimiters)?;

    Ok(definitions)
}
