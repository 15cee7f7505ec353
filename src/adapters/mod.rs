//! Adapters for the filesystem and the outside world.
//!
//! - `scanners`: detectors that read the working tree
//! - `state`: game state persistence
//! - `mcp`: the MCP stdio server

pub mod mcp;
pub mod scanners;
pub mod state;
