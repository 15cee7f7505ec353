//! Implementation of the `git-quest verify` command.

use anyhow::Result;
use clap::Args;

use crate::cli::display::{format_verification_fail, format_verification_success};
use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::services::VerifyOutcome;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Number the quest was accepted under
    pub quest_number: u32,
}

impl CommandOutput for VerifyOutcome {
    fn to_human(&self) -> String {
        match self {
            Self::Completed {
                quest,
                outcome,
                remaining,
            } => format_verification_success(quest, outcome, *remaining),
            Self::NotYet { quest } => format_verification_fail(quest),
        }
    }
}

pub async fn execute(args: VerifyArgs, ctx: &CliContext) -> Result<()> {
    let outcome = ctx.quest_service().verify(args.quest_number).await?;
    output(&outcome, ctx.json);
    Ok(())
}
