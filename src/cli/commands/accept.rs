//! Implementation of the `git-quest accept` command.

use anyhow::Result;
use clap::Args;

use crate::cli::display::{format_already_completed, format_quest_accepted};
use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::services::AcceptOutcome;

#[derive(Args, Debug)]
pub struct AcceptArgs {
    /// Quest number from the last quest board
    pub quest_number: u32,
}

impl CommandOutput for AcceptOutcome {
    fn to_human(&self) -> String {
        match self {
            Self::Accepted(quest) => format_quest_accepted(quest),
            Self::AlreadyCompleted(quest) => format_already_completed(quest),
        }
    }
}

pub async fn execute(args: AcceptArgs, ctx: &CliContext) -> Result<()> {
    let outcome = ctx.quest_service().accept(args.quest_number).await?;
    output(&outcome, ctx.json);
    Ok(())
}
