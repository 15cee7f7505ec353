//! Display framework for CLI and MCP output.
//!
//! Quest rendering lives in [`quest_format`]; terminal styling for the CLI
//! in [`colors`].

pub mod colors;
pub mod quest_format;

pub use colors::*;
pub use quest_format::*;
