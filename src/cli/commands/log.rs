//! Implementation of the `git-quest log` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::format_quest_log;
use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::services::{LogFilter, QuestLog};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Sections to show: all, active, completed, available
    #[arg(short, long, default_value = "all")]
    pub status: LogFilter,
}

#[derive(Debug, Serialize)]
pub struct LogOutput {
    #[serde(flatten)]
    pub log: QuestLog,
    #[serde(skip)]
    pub filter: LogFilter,
}

impl CommandOutput for LogOutput {
    fn to_human(&self) -> String {
        format_quest_log(&self.log, self.filter)
    }
}

pub async fn execute(args: LogArgs, ctx: &CliContext) -> Result<()> {
    let log = ctx.quest_service().log(args.status).await?;
    output(
        &LogOutput {
            log,
            filter: args.status,
        },
        ctx.json,
    );
    Ok(())
}
