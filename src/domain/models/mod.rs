pub mod badge;
pub mod config;
pub mod game_state;
pub mod progression;
pub mod quest;

pub use badge::{check_new_badges, find_badge, Badge, BADGES};
pub use config::{
    Config, LogFormat, LoggingConfig, RotationPolicy, ScanConfig, VerificationConfig,
};
pub use game_state::{CompletionOutcome, GameState, Player, STATE_VERSION};
pub use progression::{level_for, progress_for, Level, Progress, LEVELS};
pub use quest::{ActiveQuest, CompletedQuest, QuestDefinition, ScannerKind};
