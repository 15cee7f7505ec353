//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::cli::commands::{accept, log, scan, setup, verify};

#[derive(Parser, Debug)]
#[command(name = "git-quest")]
#[command(about = "git-quest - turn code maintenance into quests, XP, and badges", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Project root holding the state document and `.git-quest.yaml`
    #[arg(long, global = true, env = "GIT_QUEST_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the project for quests and show the quest board
    Scan(scan::ScanArgs),

    /// Accept a quest from the last scan by its number
    Accept(accept::AcceptArgs),

    /// Check whether an accepted quest has been completed
    Verify(verify::VerifyArgs),

    /// Show level, XP, badges, and recent completions
    Stats,

    /// Show active, completed, and available quests
    Log(log::LogArgs),

    /// Run the MCP server on stdin/stdout
    Mcp,

    /// Register git-quest as an MCP server in the client configuration
    Setup(setup::SetupArgs),
}
