//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::adapters::state::JsonStateRepository;
use crate::domain::errors::DomainError;
use crate::domain::models::Config;
use crate::services::QuestService;

pub use types::{Cli, Commands};

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub root: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl CliContext {
    pub fn new(root: &Path, config: Config, json: bool) -> Result<Self> {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(root)
        };
        Ok(Self { root, config, json })
    }

    pub fn quest_service(&self) -> QuestService<JsonStateRepository> {
        QuestService::for_root(&self.root, &self.config)
    }
}

/// Print a failed command's error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let message = match err.downcast_ref::<DomainError>() {
        Some(domain) => match domain.as_rejection() {
            Some(rejection) => display::format_rejection(rejection),
            None => domain.to_string(),
        },
        None => format!("{err:#}"),
    };

    if json_mode {
        let body = serde_json::json!({ "error": message });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {message}", display::error_label("error:"));
    }
    std::process::exit(1);
}
