//! Implementation of the `git-quest stats` command.

use anyhow::Result;

use crate::cli::display::format_player_stats;
use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::services::PlayerStats;

impl CommandOutput for PlayerStats {
    fn to_human(&self) -> String {
        format_player_stats(self)
    }
}

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let stats = ctx.quest_service().stats().await?;
    output(&stats, ctx.json);
    Ok(())
}
