//! JSON-RPC handling of the MCP stdio server.

mod common;

use common::{auth_project, temp_dir, write_file};
use git_quest::adapters::mcp::StdioServer;
use git_quest::Config;
use serde_json::{json, Value};

async fn call(server: &StdioServer, request: Value) -> Value {
    let response = server.handle_message(&request.to_string()).await;
    serde_json::from_str(&response).expect("response is JSON")
}

async fn call_tool(server: &StdioServer, id: u64, name: &str, arguments: Value) -> Value {
    let response = call(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await;
    assert_eq!(response["id"], id);
    response["result"].clone()
}

fn text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().expect("text content")
}

fn is_error(result: &Value) -> bool {
    result["isError"].as_bool().unwrap_or(false)
}

#[tokio::test]
async fn test_initialize_advertises_tools() {
    let dir = temp_dir();
    let server = StdioServer::new(dir.path().to_path_buf(), Config::default());

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["result"]["serverInfo"]["name"], "git-quest");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list() {
    let dir = temp_dir();
    let server = StdioServer::new(dir.path().to_path_buf(), Config::default());

    let response = call(&server, json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"})).await;
    let names: Vec<_> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "scan_quests",
            "accept_quest",
            "verify_quest",
            "player_stats",
            "quest_log"
        ]
    );
    assert_eq!(response["id"], "a");
}

#[tokio::test]
async fn test_protocol_errors() {
    let dir = temp_dir();
    let server = StdioServer::new(dir.path().to_path_buf(), Config::default());

    let response: Value =
        serde_json::from_str(&server.handle_message("{ not json").await).unwrap();
    assert_eq!(response["error"]["code"], -32700);
    assert!(response["id"].is_null());

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"})).await;
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["id"], 7);

    let result = call_tool(&server, 8, "delete_everything", json!({})).await;
    assert!(is_error(&result));
    assert!(text(&result).contains("Unknown tool"));
}

#[tokio::test]
async fn test_tool_flow() {
    let dir = auth_project();
    let server = StdioServer::new(dir.path().to_path_buf(), Config::default());

    // Accepting before any scan is a rejection, not a protocol error
    let result = call_tool(&server, 1, "accept_quest", json!({"quest_number": 1})).await;
    assert!(is_error(&result));
    assert!(text(&result).starts_with("❌ No quests available"));

    let result = call_tool(&server, 2, "scan_quests", json!({})).await;
    assert!(!is_error(&result));
    let board = text(&result);
    assert!(board.starts_with("⚔️ QUEST BOARD — 3 quests found!"));
    assert!(board.contains("[Quest #1]"));
    assert!(board.contains("[Quest #3]"));

    let result = call_tool(&server, 3, "accept_quest", json!({"quest_number": 9})).await;
    assert!(is_error(&result));
    assert_eq!(
        text(&result),
        "❌ Invalid quest number. Choose between 1 and 3."
    );

    let result = call_tool(&server, 4, "accept_quest", json!({"quest_number": 1})).await;
    assert!(!is_error(&result));
    assert!(text(&result).starts_with("⚔️ Quest Accepted: \"The Undocumented login\""));

    let result = call_tool(&server, 5, "verify_quest", json!({"quest_number": 1})).await;
    assert!(!is_error(&result));
    assert!(text(&result).starts_with("❌ QUEST NOT YET COMPLETE"));

    write_file(
        dir.path(),
        "src/auth.ts",
        "/** Logs a user in. */\nexport function login() {}\n// TODO: add rate limiting\n",
    );
    let result = call_tool(&server, 6, "verify_quest", json!({"quest_number": 1})).await;
    assert!(!is_error(&result));
    let message = text(&result);
    assert!(message.starts_with("✅ QUEST COMPLETE: \"The Undocumented login\""));
    assert!(message.contains("+10 XP earned!"));

    let result = call_tool(&server, 7, "player_stats", json!({})).await;
    let stats = text(&result);
    assert!(stats.contains("🏆 Quests Completed: 1"));
    assert!(stats.contains("✅ 🩸 First Blood"));

    let result = call_tool(&server, 8, "quest_log", json!({"status": "completed"})).await;
    let log = text(&result);
    assert!(log.contains("✅ COMPLETED QUESTS:"));
    assert!(!log.contains("AVAILABLE QUESTS"));

    let result = call_tool(&server, 9, "quest_log", json!({"status": "abandoned"})).await;
    assert!(is_error(&result));
}

#[tokio::test]
async fn test_scan_tool_arguments() {
    let dir = temp_dir();
    write_file(dir.path(), "pkg/src/app.ts", "// TODO: split module\n");
    let server = StdioServer::new(dir.path().to_path_buf(), Config::default());

    let result = call_tool(
        &server,
        1,
        "scan_quests",
        json!({"path": "pkg", "scanner": "todo-hunter"}),
    )
    .await;
    assert!(!is_error(&result));
    assert!(text(&result).starts_with("⚔️ QUEST BOARD — 1 quest found!"));
    assert!(dir.path().join("pkg/.git-quest.json").exists());

    let result = call_tool(&server, 2, "scan_quests", json!({"scanner": "boss"})).await;
    assert!(is_error(&result));

    let result = call_tool(&server, 3, "verify_quest", json!({"quest_number": "one"})).await;
    assert!(is_error(&result));
}
