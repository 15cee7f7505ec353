//! Infrastructure layer module
//!
//! This module contains the ambient integrations the core relies on:
//! - Configuration management
//! - Logging infrastructure
//! - Source file discovery

pub mod config;
pub mod file_walker;
pub mod logging;
