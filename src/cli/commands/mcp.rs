//! Implementation of the `git-quest mcp` command.

use anyhow::Result;

use crate::adapters::mcp::StdioServer;
use crate::cli::CliContext;

/// Serve the quest tools over stdio until the client closes stdin.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    StdioServer::new(ctx.root.clone(), ctx.config.clone())
        .run()
        .await
}
