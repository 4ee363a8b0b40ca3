use anyhow::Result;

use super::{
    context::CliContext,
    helper::finish,
    {CommandResult, CommandSummary, KeysSummary},
};
use crate::{cli::args::KeysCommand, issues::Issue};

pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let ctx = CliContext::new(&cmd.common)?;
    let files = ctx.declared_files(&ctx.language)?;

    let (keys, issues) = match ctx.localizer(files, None) {
        Ok(localizer) => (localizer.keys(), Vec::new()),
        Err(err) => (
            Vec::new(),
            vec![Issue::from_compile_error(&ctx.language, &err)],
        ),
    };

    Ok(finish(CommandSummary::Keys(KeysSummary { keys }), issues))
}
