//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Project YAML file (`.git-quest.yaml`)
//! - Environment variable overrides (`GIT_QUEST_*`)
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, CONFIG_FILE_NAME};
