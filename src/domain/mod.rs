//! Domain layer for git-quest
//!
//! Quest, player, and progression models plus the ports that the
//! services drive (scanners and state persistence).

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, QuestError};
