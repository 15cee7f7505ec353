//! CLI command implementations.

pub mod accept;
pub mod log;
pub mod mcp;
pub mod scan;
pub mod setup;
pub mod stats;
pub mod verify;
