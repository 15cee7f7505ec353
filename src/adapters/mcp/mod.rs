//! MCP (Model Context Protocol) server adapter.
//!
//! Serves the quest tools to an MCP client over newline-delimited JSON-RPC
//! on stdin/stdout.

pub mod stdio_server;

pub use stdio_server::StdioServer;
