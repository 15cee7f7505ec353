//! git-quest - code maintenance as a role-playing game
//!
//! Detectors scan a working tree for improvement opportunities (undocumented
//! exports, marker comments, untested files) and turn them into quests.
//! Players accept quests, fix the code, and verify; verified quests award
//! XP, levels, and badges. The same lifecycle is served to assistants over
//! MCP.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): quest, player, and progression models and ports
//! - **Adapters** (`adapters`): filesystem detectors, state storage, MCP server
//! - **Service Layer** (`services`): boss synthesis, verification, quest lifecycle
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, file walking
//! - **CLI Layer** (`cli`): command-line interface and text rendering
//!
//! # Example
//!
//! ```ignore
//! use git_quest::adapters::scanners::ScannerFilter;
//! use git_quest::{Config, QuestService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = QuestService::for_root(".", &Config::default());
//!     let report = service.scan(ScannerFilter::All).await?;
//!     println!("{} quests", report.quests.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult, QuestError};
pub use domain::models::{
    CompletionOutcome, Config, GameState, Level, QuestDefinition, ScannerKind,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::LoggerImpl;
pub use services::{QuestService, VerificationEngine};
