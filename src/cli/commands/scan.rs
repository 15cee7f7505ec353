//! Implementation of the `git-quest scan` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::adapters::scanners::ScannerFilter;
use crate::cli::display::format_quest_board;
use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::services::{QuestService, ScanReport};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the project root)
    pub path: Option<PathBuf>,

    /// Detector to run: all, missing-docs, todo-hunter, missing-tests
    #[arg(short, long, default_value = "all")]
    pub scanner: ScannerFilter,
}

impl CommandOutput for ScanReport {
    fn to_human(&self) -> String {
        format_quest_board(self)
    }
}

pub async fn execute(args: ScanArgs, ctx: &CliContext) -> Result<()> {
    let root = args
        .path
        .map_or_else(|| ctx.root.clone(), |path| ctx.root.join(path));

    let report = QuestService::for_root(root, &ctx.config)
        .scan(args.scanner)
        .await?;

    output(&report, ctx.json);
    Ok(())
}
