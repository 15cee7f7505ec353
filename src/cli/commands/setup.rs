//! Implementation of the `git-quest setup` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::fs;
use tracing::warn;

use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;

/// Key the server is registered under in `mcpServers`
pub const SERVER_NAME: &str = "git-quest";

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// MCP client configuration file (defaults to ~/.copilot/mcp-config.json)
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct SetupOutput {
    pub config_file: PathBuf,
    pub server_name: String,
}

impl CommandOutput for SetupOutput {
    fn to_human(&self) -> String {
        [
            "🎮 git-quest setup complete!".to_string(),
            String::new(),
            format!("✅ Registered as MCP server in {}", self.config_file.display()),
            String::new(),
            "Next steps:".to_string(),
            "  1. Open a terminal in any project directory".to_string(),
            "  2. Start your MCP-enabled assistant".to_string(),
            "  3. Say: \"scan this repo for quests\"".to_string(),
            "  4. Complete quests to earn XP and level up! ⚔️".to_string(),
            String::new(),
            "Happy adventuring! 🐉".to_string(),
        ]
        .join("\n")
    }
}

/// Default client configuration path under the user's home directory.
pub fn default_config_file() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".copilot").join("mcp-config.json"))
}

/// Add or replace the `git-quest` entry in `mcpServers`, keeping everything else.
///
/// A missing or malformed file is replaced by a fresh configuration.
pub async fn merge_mcp_config(config_file: &Path) -> Result<()> {
    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut config = match fs::read_to_string(config_file).await {
        Ok(content) => serde_json::from_str::<serde_json::Value>(&content)
            .ok()
            .filter(serde_json::Value::is_object)
            .unwrap_or_else(|| {
                warn!(path = %config_file.display(), "MCP config is malformed; starting fresh");
                serde_json::json!({})
            }),
        Err(_) => serde_json::json!({}),
    };

    let map = config
        .as_object_mut()
        .context("MCP config must be a JSON object")?;

    let servers = map
        .entry("mcpServers")
        .or_insert_with(|| serde_json::json!({}));
    if !servers.is_object() {
        *servers = serde_json::json!({});
    }
    if let Some(servers) = servers.as_object_mut() {
        servers.insert(
            SERVER_NAME.into(),
            serde_json::json!({
                "command": "git-quest",
                "args": ["mcp"]
            }),
        );
    }

    let content = serde_json::to_string_pretty(&config)?;
    fs::write(config_file, format!("{content}\n"))
        .await
        .with_context(|| format!("Failed to write {}", config_file.display()))?;
    Ok(())
}

pub async fn execute(args: SetupArgs, ctx: &CliContext) -> Result<()> {
    let config_file = match args.config_file {
        Some(path) => path,
        None => default_config_file()?,
    };

    merge_mcp_config(&config_file).await?;

    output(
        &SetupOutput {
            config_file,
            server_name: SERVER_NAME.to_string(),
        },
        ctx.json,
    );
    Ok(())
}
