//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces that adapters implement:
//! - GameStateRepository: load and save the whole game state document
//! - Scanner: detect quests in a tree and re-inspect accepted ones
//!
//! These traits keep the quest lifecycle independent of where state is
//! stored and of the concrete detection heuristics.

pub mod scanner;
pub mod state_repository;

pub use scanner::Scanner;
pub use state_repository::GameStateRepository;
