//! git-quest CLI entry point.

use anyhow::Context;
use clap::Parser;

use git_quest::cli::{commands, handle_error, Cli, CliContext, Commands};
use git_quest::{ConfigLoader, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigLoader::load(&cli.root)
        .with_context(|| format!("Failed to load configuration for {}", cli.root.display()))?;
    let _logger = LoggerImpl::init(&config.logging, cli.verbose)?;

    let ctx = CliContext::new(&cli.root, config, cli.json)?;
    tracing::debug!(root = %ctx.root.display(), command = ?cli.command, "dispatching command");

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &ctx).await,
        Commands::Accept(args) => commands::accept::execute(args, &ctx).await,
        Commands::Verify(args) => commands::verify::execute(args, &ctx).await,
        Commands::Stats => commands::stats::execute(&ctx).await,
        Commands::Log(args) => commands::log::execute(args, &ctx).await,
        Commands::Mcp => commands::mcp::execute(&ctx).await,
        Commands::Setup(args) => commands::setup::execute(args, &ctx).await,
    }
}
