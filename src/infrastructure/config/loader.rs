use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project configuration file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = ".git-quest.yaml";

/// Environment variable prefix for overrides (`GIT_QUEST_LOGGING__LEVEL=debug`)
pub const ENV_PREFIX: &str = "GIT_QUEST_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("State file name cannot be empty")]
    EmptyStateFile,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid verification window: window_after must be at least 1")]
    EmptyVerificationWindow,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the project rooted at `root`
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `<root>/.git-quest.yaml` (optional)
    /// 3. Environment variables (`GIT_QUEST_*` prefix, `__` for nesting)
    pub fn load(root: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(root.as_ref().join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.state_file.trim().is_empty() {
            return Err(ConfigError::EmptyStateFile);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.verification.window_after == 0 {
            return Err(ConfigError::EmptyVerificationWindow);
        }

        Ok(())
    }
}
