use anyhow::Result;

use super::{
    context::CliContext,
    helper::finish,
    {CommandResult, CommandSummary, GetSummary},
};
use crate::{cli::args::GetCommand, issues::Issue};

pub fn get(cmd: GetCommand) -> Result<CommandResult> {
    let ctx = CliContext::new(&cmd.common)?;
    let files = ctx.declared_files(&ctx.language)?;

    let localizer = match ctx.localizer(files, cmd.unresolved) {
        Ok(localizer) => localizer,
        Err(err) => {
            return Ok(finish(
                CommandSummary::Get(GetSummary { text: None }),
                vec![Issue::from_compile_error(&ctx.language, &err)],
            ));
        }
    };

    let ad_hoc: Vec<(&str, &str)> = cmd
        .substitutions
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    let text = localizer.get(&cmd.key, &ad_hoc);

    Ok(finish(
        CommandSummary::Get(GetSummary { text: Some(text) }),
        Vec::new(),
    ))
}
