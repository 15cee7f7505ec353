//! Application services: quest synthesis, verification, and the quest lifecycle.

pub mod boss_quests;
pub mod quest_service;
pub mod verification_engine;

pub use boss_quests::generate_boss_quests;
pub use quest_service::{
    AcceptOutcome, BadgeStatus, LogFilter, PlayerStats, QuestLog, QuestService, ScanReport,
    VerifyOutcome,
};
pub use verification_engine::VerificationEngine;
