//! MCP stdio server implementing JSON-RPC 2.0 over stdin/stdout.
//!
//! Exposes the quest lifecycle (scan, accept, verify, stats, log) as MCP
//! tools so an assistant can drive the game from a chat session.
//!
//! Protocol: newline-delimited JSON-RPC 2.0 on stdin/stdout.
//! Logging goes to stderr (stdout is reserved for protocol messages).

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::adapters::scanners::ScannerFilter;
use crate::adapters::state::JsonStateRepository;
use crate::cli::display::{
    format_already_completed, format_player_stats, format_quest_accepted, format_quest_board,
    format_quest_log, format_rejection, format_verification_fail, format_verification_success,
};
use crate::domain::errors::DomainError;
use crate::domain::models::Config;
use crate::services::{AcceptOutcome, LogFilter, QuestService, VerifyOutcome};

/// MCP stdio server that exposes the quest tools.
pub struct StdioServer {
    root: PathBuf,
    config: Config,
}

impl StdioServer {
    pub fn new(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// Run the stdio server loop, reading JSON-RPC from stdin and writing responses to stdout.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        info!(root = %self.root.display(), "MCP stdio server started");

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = self.handle_message(line).await;
            if response.is_empty() {
                continue;
            }
            let mut response_bytes = response.into_bytes();
            response_bytes.push(b'\n');
            stdout.write_all(&response_bytes).await?;
            stdout.flush().await?;
        }

        info!("MCP stdio server stopped");
        Ok(())
    }

    /// Handle one JSON-RPC message. Returns an empty string for notifications.
    pub async fn handle_message(&self, line: &str) -> String {
        let request: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable JSON-RPC message");
                return Self::error_response(
                    serde_json::Value::Null,
                    -32700,
                    &format!("Parse error: {e}"),
                );
            }
        };

        let id = request.get("id").cloned().unwrap_or(serde_json::Value::Null);
        let method = request
            .get("method")
            .and_then(|m| m.as_str())
            .unwrap_or("");
        let params = request
            .get("params")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        debug!(method, "JSON-RPC request");

        match method {
            "initialize" => Self::handle_initialize(id),
            "tools/list" => Self::handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, &params).await,
            m if m.starts_with("notifications/") => String::new(),
            _ => Self::error_response(id, -32601, &format!("Method not found: {method}")),
        }
    }

    fn handle_initialize(id: serde_json::Value) -> String {
        let result = serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "git-quest",
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        Self::success_response(id, result)
    }

    fn handle_tools_list(id: serde_json::Value) -> String {
        let tools = serde_json::json!({
            "tools": [
                {
                    "name": "scan_quests",
                    "description": "Scan the current repository for maintenance quests. Returns a list of quests with difficulty ratings, XP rewards, and descriptions. Each quest represents a real code improvement task.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string", "description": "Root directory to scan. Defaults to the server's working directory." },
                            "scanner": { "type": "string", "enum": ["all", "missing-docs", "todo-hunter", "missing-tests"], "description": "Which scanner to run. Defaults to 'all'." }
                        }
                    }
                },
                {
                    "name": "accept_quest",
                    "description": "Accept a quest by its number. This marks the quest as in-progress and provides detailed instructions for completing it. After accepting, complete the task, then verify it.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "quest_number": { "type": "integer", "description": "The quest number to accept (from scan_quests output)" }
                        },
                        "required": ["quest_number"]
                    }
                },
                {
                    "name": "verify_quest",
                    "description": "Verify if an accepted quest has been completed. Re-scans the relevant code to check if the issue has been resolved. Awards XP and badges on successful completion.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "quest_number": { "type": "integer", "description": "The quest number to verify" }
                        },
                        "required": ["quest_number"]
                    }
                },
                {
                    "name": "player_stats",
                    "description": "Show your current player statistics including level, XP, badges earned, and quest completion history.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {}
                    }
                },
                {
                    "name": "quest_log",
                    "description": "Show detailed history of all completed and in-progress quests.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "string", "enum": ["all", "completed", "active", "available"], "description": "Filter quests by status. Defaults to 'all'." }
                        }
                    }
                }
            ]
        });
        Self::success_response(id, tools)
    }

    async fn handle_tools_call(&self, id: serde_json::Value, params: &serde_json::Value) -> String {
        let tool_name = params
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("");
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        let result = match tool_name {
            "scan_quests" => self.tool_scan_quests(&arguments).await,
            "accept_quest" => self.tool_accept_quest(&arguments).await,
            "verify_quest" => self.tool_verify_quest(&arguments).await,
            "player_stats" => self.tool_player_stats().await,
            "quest_log" => self.tool_quest_log(&arguments).await,
            _ => Err(format!("Unknown tool: {tool_name}")),
        };

        match result {
            Ok(content) => {
                let result = serde_json::json!({
                    "content": [{
                        "type": "text",
                        "text": content
                    }]
                });
                Self::success_response(id, result)
            }
            Err(error) => {
                warn!(tool = tool_name, error = %error, "tool call failed");
                let result = serde_json::json!({
                    "content": [{
                        "type": "text",
                        "text": error
                    }],
                    "isError": true
                });
                Self::success_response(id, result)
            }
        }
    }

    // ========================================================================
    // Quest tools
    // ========================================================================

    fn service(&self) -> QuestService<JsonStateRepository> {
        QuestService::for_root(&self.root, &self.config)
    }

    async fn tool_scan_quests(&self, args: &serde_json::Value) -> Result<String, String> {
        let root = args
            .get("path")
            .and_then(|p| p.as_str())
            .map_or_else(|| self.root.clone(), |p| self.root.join(p));
        let filter: ScannerFilter = args
            .get("scanner")
            .and_then(|s| s.as_str())
            .unwrap_or("all")
            .parse()?;

        let report = QuestService::for_root(root, &self.config)
            .scan(filter)
            .await
            .map_err(|e| tool_error(&e))?;
        Ok(format_quest_board(&report))
    }

    async fn tool_accept_quest(&self, args: &serde_json::Value) -> Result<String, String> {
        let quest_number = quest_number(args)?;
        match self
            .service()
            .accept(quest_number)
            .await
            .map_err(|e| tool_error(&e))?
        {
            AcceptOutcome::Accepted(quest) => Ok(format_quest_accepted(&quest)),
            AcceptOutcome::AlreadyCompleted(quest) => Ok(format_already_completed(&quest)),
        }
    }

    async fn tool_verify_quest(&self, args: &serde_json::Value) -> Result<String, String> {
        let quest_number = quest_number(args)?;
        match self
            .service()
            .verify(quest_number)
            .await
            .map_err(|e| tool_error(&e))?
        {
            VerifyOutcome::Completed {
                quest,
                outcome,
                remaining,
            } => Ok(format_verification_success(&quest, &outcome, remaining)),
            VerifyOutcome::NotYet { quest } => Ok(format_verification_fail(&quest)),
        }
    }

    async fn tool_player_stats(&self) -> Result<String, String> {
        let stats = self.service().stats().await.map_err(|e| tool_error(&e))?;
        Ok(format_player_stats(&stats))
    }

    async fn tool_quest_log(&self, args: &serde_json::Value) -> Result<String, String> {
        let filter: LogFilter = args
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("all")
            .parse()?;

        let log = self.service().log(filter).await.map_err(|e| tool_error(&e))?;
        Ok(format_quest_log(&log, filter))
    }

    fn success_response(id: serde_json::Value, result: serde_json::Value) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result
        })
        .to_string()
    }

    fn error_response(id: serde_json::Value, code: i32, message: &str) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": code,
                "message": message
            }
        })
        .to_string()
    }
}

fn quest_number(args: &serde_json::Value) -> Result<u32, String> {
    let value = args
        .get("quest_number")
        .ok_or("Missing required field: quest_number")?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| format!("Invalid quest_number: {value}"))
}

fn tool_error(err: &DomainError) -> String {
    match err.as_rejection() {
        Some(rejection) => format_rejection(rejection),
        None => format!("❌ {err}"),
    }
}
